//! CLI command for browsing the audit log

use clap::Args;

use crate::error::StorebookResult;
use crate::storage::Storage;

/// Arguments of `audit`
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of most recent records to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Handle the audit command
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> StorebookResult<()> {
    let records = storage.audit().read_recent(args.limit)?;

    if records.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    for record in records.iter().rev() {
        println!("{}", record.format_human_readable());
    }

    Ok(())
}
