use blackjack_lib::GameSummary;
use std::io::Write;

/// Writes the summary as the fixed width stats table.
pub fn write_summary(summary: &GameSummary, mut writer: impl Write) -> std::io::Result<()> {
    writeln!(writer, "{}", summary)?;
    writer.flush()
}

/// Writes the summary as pretty printed JSON.
pub fn write_summary_json(summary: &GameSummary, mut writer: impl Write) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    writer.flush().map_err(serde_json::Error::io)
}
