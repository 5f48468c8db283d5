//! Shared data model for the beneficiary intake service.
//!
//! Holds the storage-shaped record types, the camelCase API input shape and
//! its normalization into the storage shape, and the decoding of
//! heterogeneous stored tag/emotion values into uniform collections.

pub mod api;
pub mod beneficiary;
pub mod db;
pub mod emotions;
pub mod normalize;
pub mod tags;

pub use beneficiary::{Beneficiary, BeneficiaryDraft, BeneficiaryPatch};
pub use emotions::{EmotionEntry, EmotionPalette, ParsedEmotion};
