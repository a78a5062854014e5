//! Shortcut reference shown in the help panel and the status bar.

use wrangler_scene::{LightType, Mode, RenderEngine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub key: &'static str,
    pub description: String,
    /// Marks the entry of the mode the session is in.
    pub current: bool,
}

impl HelpEntry {
    fn new(key: &'static str, description: impl Into<String>) -> Self {
        Self {
            key,
            description: description.into(),
            current: false,
        }
    }

    /// Mode-switch lines never appear in the status bar.
    fn is_mode_switch(&self) -> bool {
        self.current || self.description.contains("Mode")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub title: &'static str,
    pub entries: Vec<HelpEntry>,
}

/// Everything needed to pick the visible shortcuts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelpContext<'a> {
    pub mode: Mode,
    pub light_type: LightType,
    pub is_paused: bool,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub engine: &'a RenderEngine,
}

fn size_description(light_type: LightType) -> &'static str {
    match light_type {
        LightType::Area => "Size",
        LightType::Spot => "Spot Size",
        LightType::Sun => "Angle",
        LightType::Point => "Radius",
    }
}

fn adjustments(ctx: &HelpContext<'_>) -> Vec<HelpEntry> {
    let mut entries = vec![
        HelpEntry::new("Wheel", "Power"),
        HelpEntry::new("Shift+Wheel", size_description(ctx.light_type)),
    ];
    if ctx.light_type == LightType::Area && ctx.shift {
        entries.push(HelpEntry::new("Shift+Alt+Wheel", "Size X"));
        entries.push(HelpEntry::new("Shift+Ctrl+Wheel", "Size Y"));
    }
    if ctx.light_type != LightType::Sun {
        entries.push(HelpEntry::new("Alt+Wheel", "Distance"));
        entries.push(HelpEntry::new("Z+Wheel", "Rotation"));
        if matches!(ctx.light_type, LightType::Area | LightType::Spot) {
            entries.push(HelpEntry::new("Ctrl+Wheel", "Spread"));
        }
    }
    if ctx.mode == Mode::Orbit {
        entries.push(HelpEntry::new("Shift", "Precise Movement"));
    }
    entries
}

fn mode_switch(ctx: &HelpContext<'_>) -> Vec<HelpEntry> {
    let pause_action = if ctx.is_paused { "Unpause" } else { "Pause" };
    [("1", Mode::Reflect), ("2", Mode::Orbit), ("3", Mode::Direct)]
        .into_iter()
        .map(|(key, mode)| {
            if mode == ctx.mode {
                HelpEntry {
                    key,
                    description: pause_action.to_string(),
                    current: true,
                }
            } else {
                HelpEntry::new(key, mode.display_name())
            }
        })
        .collect()
}

fn miscellaneous() -> Vec<HelpEntry> {
    vec![
        HelpEntry::new("L", "Link Lighting"),
        HelpEntry::new("Shift+L", "Shadow Linking"),
        HelpEntry::new("I", "Isolate Light"),
        HelpEntry::new("H", "Hide Light"),
        HelpEntry::new("F", "False Color"),
    ]
}

/// Sections in display order. Miscellaneous only exists for engines that
/// support light linking.
#[must_use]
pub fn help_sections(ctx: &HelpContext<'_>) -> Vec<HelpSection> {
    let mut sections = vec![
        HelpSection {
            title: "Adjustments",
            entries: adjustments(ctx),
        },
        HelpSection {
            title: "Mode Switch",
            entries: mode_switch(ctx),
        },
    ];
    if ctx.engine.supports_light_linking() {
        sections.push(HelpSection {
            title: "Miscellaneous",
            entries: miscellaneous(),
        });
    }
    sections
}

/// One row of the help panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpLine {
    Shortcut { key: String, description: String },
    Header(String),
    Blank,
}

/// Full help panel content, starting with the toggle hint.
#[must_use]
pub fn formatted_help(ctx: &HelpContext<'_>) -> Vec<HelpLine> {
    let mut lines = vec![
        HelpLine::Shortcut {
            key: "Q".to_string(),
            description: "Hide Controls".to_string(),
        },
        HelpLine::Blank,
    ];
    for section in help_sections(ctx) {
        if section.entries.is_empty() {
            continue;
        }
        lines.push(HelpLine::Header(format!("─── {} ───", section.title)));
        lines.extend(section.entries.into_iter().map(|entry| HelpLine::Shortcut {
            key: entry.key.to_string(),
            description: if entry.current {
                format!("→ {}", entry.description)
            } else {
                entry.description
            },
        }));
        lines.push(HelpLine::Blank);
    }
    lines
}

/// Status bar summary: an optional per-axis hint followed by the
/// adjustment and miscellaneous shortcuts.
#[must_use]
pub fn status_bar_text(ctx: &HelpContext<'_>) -> String {
    let mut parts = Vec::new();
    if ctx.light_type == LightType::Area && ctx.shift {
        if ctx.alt {
            parts.push("Size X".to_string());
        } else if ctx.ctrl {
            parts.push("Size Y".to_string());
        }
    }
    for section in help_sections(ctx) {
        parts.extend(
            section
                .entries
                .iter()
                .filter(|entry| !entry.is_mode_switch())
                .map(|entry| format!("{}: {}", entry.key, entry.description)),
        );
    }
    parts.join("  |  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: Mode, light_type: LightType, engine: &RenderEngine) -> HelpContext<'_> {
        HelpContext {
            mode,
            light_type,
            is_paused: false,
            shift: false,
            alt: false,
            ctrl: false,
            engine,
        }
    }

    #[test]
    fn sun_lists_only_power_and_angle() {
        let engine = RenderEngine::Cycles;
        let sections = help_sections(&ctx(Mode::Reflect, LightType::Sun, &engine));
        let descriptions: Vec<_> = sections[0].entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, ["Power", "Angle"]);
    }

    #[test]
    fn shift_expands_area_adjustments() {
        let engine = RenderEngine::Cycles;
        let mut c = ctx(Mode::Direct, LightType::Area, &engine);
        c.shift = true;
        let sections = help_sections(&c);
        assert!(sections[0].entries.iter().any(|e| e.description == "Size X"));
        assert!(sections[0].entries.iter().any(|e| e.description == "Size Y"));
    }

    #[test]
    fn current_mode_shows_pause_action() {
        let engine = RenderEngine::Workbench;
        let mut c = ctx(Mode::Orbit, LightType::Spot, &engine);
        c.is_paused = true;
        let lines = formatted_help(&c);
        assert!(lines.contains(&HelpLine::Shortcut {
            key: "2".to_string(),
            description: "→ Unpause".to_string()
        }));
        assert!(!lines.contains(&HelpLine::Header("─── Miscellaneous ───".to_string())));
    }

    #[test]
    fn status_bar_skips_mode_lines() {
        let engine = RenderEngine::Cycles;
        let mut c = ctx(Mode::Reflect, LightType::Area, &engine);
        c.shift = true;
        c.alt = true;
        let text = status_bar_text(&c);
        assert!(text.starts_with("Size X  |  Wheel: Power"));
        assert!(!text.contains("Mode"));
        assert!(!text.contains("Pause"));
        assert!(text.ends_with("F: False Color"));
    }
}
