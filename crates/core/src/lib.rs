pub mod pipeline;
pub mod shared;
pub mod subtitle;
pub mod transcript;
