//! Lords CLI library

pub mod commands;
pub mod context;
pub mod error;
pub mod render;

/// Vote direction as typed on the command line
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum VoteArg {
    Up,
    Down,
}

impl From<VoteArg> for lords::VoteValue {
    fn from(arg: VoteArg) -> Self {
        match arg {
            VoteArg::Up => lords::VoteValue::Up,
            VoteArg::Down => lords::VoteValue::Down,
        }
    }
}
