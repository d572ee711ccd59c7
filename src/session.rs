//! The remembered face.
//!
//! A single slot shared by every conversation: whoever sent the last photo
//! with a face sets the baseline the next photo is compared against. Reads
//! and writes are individually atomic, but the dispatcher reads, awaits the
//! verification call and only then writes, so two image events in flight at
//! once can verify against each other's faces or overwrite each other.

use std::sync::{Mutex, PoisonError};

pub trait FaceIdStore: Send + Sync {
    fn get(&self) -> Option<String>;

    /// Stores `face_id`, returning the value it replaced.
    fn set(&self, face_id: String) -> Option<String>;
}

/// Process-wide, starts empty, never cleared.
#[derive(Debug, Default)]
pub struct LastFaceSlot {
    slot: Mutex<Option<String>>,
}

impl LastFaceSlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FaceIdStore for LastFaceSlot {
    fn get(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, face_id: String) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(face_id)
    }
}
