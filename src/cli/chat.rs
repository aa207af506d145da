//! `taskdeck chat` command implementation

use anyhow::{bail, Result};
use clap::Args;

use crate::chat::{ChatRelay, Followup, Speaker};

#[derive(Args)]
pub struct ChatArgs {
    /// Message for the assistant
    #[arg(required = true, num_args = 1..)]
    message: Vec<String>,

    /// Accept a reset requested by the assistant without prompting
    #[arg(short, long)]
    yes: bool,
}

pub async fn run(server_url: &str, args: ChatArgs) -> Result<()> {
    let message = args.message.join(" ");
    if message.trim().is_empty() {
        bail!("Message cannot be empty");
    }

    let mut client = super::connect(server_url).await?;
    let mut relay = ChatRelay::new();

    let outcome = relay.send(&message, &mut client).await;
    if outcome.followup == Followup::ConfirmReset {
        let confirmed =
            args.yes || super::confirm("The assistant wants to delete all tasks. Continue?")?;
        let performed = confirmed && client.reset_all().await.any();
        relay.record_reset(performed);
    }

    // The transcript carries the outcome; notices would repeat it
    client.take_notices();

    for line in relay.transcript().iter().skip(1) {
        match line.speaker {
            Speaker::You => println!("> {}", line.text),
            Speaker::Assistant => println!("{}", line.text),
            Speaker::Notice => eprintln!("{}", line.text),
        }
    }
    Ok(())
}
