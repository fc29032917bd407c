pub mod scripted_sampler;
pub mod sysinfo_sampler;

pub use scripted_sampler::ScriptedSampler;
pub use sysinfo_sampler::SysinfoSampler;
