mod batch;
mod experiment;
mod export;
mod sample;
mod section;
mod tea;
mod weight;

pub use batch::BatchCommands;
pub use experiment::ExperimentCommands;
pub use export::ExportCommands;
pub use sample::SampleCommands;
pub use section::SectionCommands;
pub use tea::TeaCommands;
pub use weight::WeightCommands;
