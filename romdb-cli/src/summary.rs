//! Markdown report for a product identifier update run.

use std::fmt;

use romdb_import::{MatchClass, Reconciliation};

fn cell(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Render the run as Markdown: statistics, skipped-update warnings, then one
/// table per classification.
pub(crate) fn render_summary(result: &Reconciliation) -> String {
    Summary(result).to_string()
}

struct Summary<'a>(&'a Reconciliation);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let unchanged = result.count(MatchClass::Unchanged);
        let matched = result.count(MatchClass::Updated) + unchanged;
        let primary_only = result.count(MatchClass::PrimaryOnly);
        let secondary_only = result.count(MatchClass::SecondaryOnly);

        writeln!(f, "# Product ID Update Summary\n")?;
        writeln!(f, "## Statistics\n")?;
        writeln!(f, "- Total games in database: {}", result.primary_total())?;
        writeln!(f, "- Games matched: {matched}")?;
        writeln!(f, "- Games updated: {}", result.applied.len())?;
        writeln!(f, "- Games unchanged: {unchanged}")?;
        writeln!(f, "- Games not found in code list: {primary_only}")?;
        writeln!(f, "- Codes not matched to any game: {secondary_only}")?;
        writeln!(
            f,
            "- Updates skipped due to region/cartridge code mismatch: {}\n",
            result.skipped.len()
        )?;

        if !result.skipped.is_empty() {
            writeln!(f, "## Warnings - Updates Skipped\n")?;
            for skipped in &result.skipped {
                writeln!(f, "- {}", skipped.warning())?;
            }
            writeln!(f)?;
        }

        if !result.applied.is_empty() {
            writeln!(f, "## Updated Games\n")?;
            writeln!(f, "| Title | Old Product ID | New Product ID |")?;
            writeln!(f, "|-------|----------------|----------------|")?;
            for update in &result.applied {
                writeln!(
                    f,
                    "| {} | {} | {} |",
                    update.title,
                    cell(update.old_product_id.as_deref()),
                    update.new_product_id
                )?;
            }
            writeln!(f)?;
        }

        if unchanged > 0 {
            writeln!(f, "## Unchanged Games\n")?;
            writeln!(f, "| Title | Product ID |")?;
            writeln!(f, "|-------|------------|")?;
            for m in result.of_class(MatchClass::Unchanged) {
                writeln!(f, "| {} | {} |", m.title, cell(m.current_product_id.as_deref()))?;
            }
            writeln!(f)?;
        }

        if primary_only > 0 {
            writeln!(f, "## Games Not Found in Code List\n")?;
            writeln!(f, "| Title | ROM ID |")?;
            writeln!(f, "|-------|--------|")?;
            for m in result.of_class(MatchClass::PrimaryOnly) {
                writeln!(f, "| {} | {} |", cell(Some(&m.title)), cell(m.rom_id.as_deref()))?;
            }
            writeln!(f)?;
        }

        if secondary_only > 0 {
            writeln!(f, "## Codes Not Matched to Any Game\n")?;
            writeln!(f, "| Title | Product ID |")?;
            writeln!(f, "|-------|------------|")?;
            for m in result.of_class(MatchClass::SecondaryOnly) {
                writeln!(f, "| {} | {} |", m.title, cell(m.proposed_product_id.as_deref()))?;
            }
        }

        Ok(())
    }
}
