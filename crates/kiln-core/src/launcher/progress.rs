use std::fmt::Display;

/// Steps of a launch, reported in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaunchStage {
    Descriptor,
    PrimaryArtifact,
    Libraries,
    Natives,
    Command,
    Launched,
}

impl Display for LaunchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LaunchStage::Descriptor => "descriptor",
            LaunchStage::PrimaryArtifact => "primary artifact",
            LaunchStage::Libraries => "libraries",
            LaunchStage::Natives => "natives",
            LaunchStage::Command => "command",
            LaunchStage::Launched => "launched",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchProgress {
    pub stage: LaunchStage,
    pub percent: u8,
    pub message: String,
}

impl LaunchProgress {
    pub fn new(stage: LaunchStage, percent: u8, message: impl Into<String>) -> Self {
        Self {
            stage,
            percent,
            message: message.into(),
        }
    }
}

impl Display for LaunchProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:>3}%] {}: {}", self.percent, self.stage, self.message)
    }
}

pub(crate) const DESCRIPTOR_PERCENT: u8 = 10;
pub(crate) const PRIMARY_ARTIFACT_PERCENT: u8 = 30;
pub(crate) const LIBRARIES_DONE_PERCENT: u8 = 90;
pub(crate) const COMMAND_PERCENT: u8 = 95;
pub(crate) const LAUNCHED_PERCENT: u8 = 100;

/// Percent after `done` of `total` libraries are processed.
pub(crate) fn libraries_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return LIBRARIES_DONE_PERCENT;
    }

    let span = u64::from(LIBRARIES_DONE_PERCENT - PRIMARY_ARTIFACT_PERCENT);
    let scaled = span * done.min(total) as u64 / total as u64;

    PRIMARY_ARTIFACT_PERCENT + scaled as u8
}
