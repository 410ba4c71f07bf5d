#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Shared data contract for the virtual try-on gateway
//!
//! Image payloads, garment categories, the category to instruction table,
//! data URL helpers, wire bodies, and the failure taxonomy used on both sides
//! of the gateway endpoint.

mod asset;
mod category;
pub mod data_url;
mod failure;
pub mod instruction;
mod request;
pub mod wire;

pub use asset::{AssetError, ImageAsset, normalize_image_media_type, validate_base64};
pub use category::{Category, UnknownCategory};
pub use data_url::{DataUrl, format_data_url};
pub use failure::FailureKind;
pub use instruction::{InstructionSet, InstructionStrategy};
pub use request::{ImageSlot, MissingImage, TryOnRequest};
pub use wire::{ErrorBody, GatewayStatus, TryOnPayload, TryOnResponse};
