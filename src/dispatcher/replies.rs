/// Sent when there is nothing to compare against yet, or no face was found.
pub const ANOTHER_PHOTO_PROMPT: &str = "顔写真をもう一枚送信してください。";

/// Sent for any download or analysis failure.
pub const DISPATCH_FAILURE: &str = "画像取得or画像分析中にエラーが発生しました。";

/// `confidence * 100`, floored.
pub fn similarity_percent(confidence: f64) -> u32 {
    (confidence * 100.0).floor().clamp(0.0, 100.0) as u32
}

pub fn similarity_message(confidence: f64) -> String {
    format!("顔の一致度は、{}%です", similarity_percent(confidence))
}
