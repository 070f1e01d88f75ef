pub mod batch;
pub mod dispatch;
pub mod experiment;
pub mod export;
pub mod report;
pub mod sample;
pub mod section;
pub mod shared;
pub mod tea;
pub mod weight;
