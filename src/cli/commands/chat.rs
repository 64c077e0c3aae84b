use anyhow::Result;

use crate::chat::ChatSession;
use crate::cli::SessionArgs;
use crate::config::{ResolveOptions, SettingsManager, resolve_config};

pub async fn run_chat(manager: &SettingsManager, args: SessionArgs) -> Result<()> {
    let settings = manager.load()?;
    let options = ResolveOptions {
        from: args.from,
        to: args.to,
        llm: args.llm,
    };
    let resolved = resolve_config(&options, &settings)?;

    let mut session = ChatSession::new(settings, &resolved);
    session.run().await
}
