use anyhow::Result;
use clap::ValueEnum;
use valentine_message::{
    create_default_combined_message, create_default_intro, create_default_outro, Schema,
};

use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessagePart {
    Intro,
    Outro,
    Combined,
}

/// Print the default intro, outro or combined message
pub fn show(part: MessagePart, output: &Output) -> Result<()> {
    let value = match part {
        MessagePart::Intro => create_default_intro().to_value()?,
        MessagePart::Outro => create_default_outro().to_value()?,
        MessagePart::Combined => create_default_combined_message().to_value()?,
    };
    output.success("default", value);
    Ok(())
}
