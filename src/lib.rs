mod html;
mod image_utils;
mod ort_service;
mod routes;
mod server;
mod telemetry;
mod upload;

pub mod app;
pub mod config;
pub mod labels;
pub mod model_service;
pub mod nutrition;
pub mod pipeline;

pub use app::start_app;
pub use image_utils::{transform_image, DecodeError, INPUT_SIZE};
pub use server::{build_router, SharedState};
pub use telemetry::Metrics;
