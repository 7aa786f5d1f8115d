//! Shared UI icons.
//!
//! Each icon has an ASCII fallback for terminals without Unicode support.

use console::Emoji;

// Stage checklist
pub static STAGE_DONE: Emoji<'_, '_> = Emoji("✓", "[x]");
pub static STAGE_CURRENT: Emoji<'_, '_> = Emoji("▶", "[>]");
pub static STAGE_PENDING: Emoji<'_, '_> = Emoji("·", "[ ]");

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");
pub static HOURGLASS: Emoji<'_, '_> = Emoji("⏳ ", "[..]");
pub static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "");
