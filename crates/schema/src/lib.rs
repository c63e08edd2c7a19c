//! Wire types shared by the gateway and the inspection client.

mod dimensions;
mod prediction;

pub use dimensions::ImageDimensions;
pub use prediction::{ErrorBody, InferenceResponse, Prediction};
