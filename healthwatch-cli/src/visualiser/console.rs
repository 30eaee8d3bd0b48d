//! Console report rendering.
//!
//! Draws the report as an indented tree, one node per line, each line
//! prefixed with a symbol for the node's verdict:
//!
//! ```text
//! ✅ shop
//!   ✅ web
//!     ✅ homepage
//!   ❌ cache
//!     ❌ redis-1
//! ```

use clap::ValueEnum;

use healthwatch_sdk::{Report, Status};

use super::Visualiser;

/// The symbols used for each verdict.
#[derive(Debug, Clone)]
pub struct Symbols {
    pub up: String,
    pub down: String,
    pub not_found: String,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            up: "✅".to_string(),
            down: "❌".to_string(),
            not_found: "❔".to_string(),
        }
    }
}

impl Symbols {
    fn for_status(&self, status: Status) -> &str {
        match status {
            Status::Up => &self.up,
            Status::Down => &self.down,
            Status::NotFound => &self.not_found,
        }
    }
}

/// Which subtrees to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Show {
    /// Every node.
    #[default]
    All,
    /// Only subtrees that are not up. The root is always drawn.
    Failing,
}

/// Renders a report as an indented console tree.
#[derive(Debug, Default)]
pub struct Console {
    symbols: Symbols,
    show: Show,
}

impl Console {
    pub fn new(symbols: Symbols, show: Show) -> Self {
        Self { symbols, show }
    }

    fn render(&self, report: &Report, depth: usize, out: &mut Vec<String>) {
        out.push(format!(
            "{}{} {}",
            "  ".repeat(depth),
            self.symbols.for_status(report.status),
            report.name,
        ));
        for child in &report.children {
            if self.show == Show::Failing && child.status.is_up() {
                continue;
            }
            self.render(child, depth + 1, out);
        }
    }
}

impl Visualiser for Console {
    fn visualise(&self, report: &Report) -> anyhow::Result<String> {
        let mut lines = Vec::new();
        self.render(report, 0, &mut lines);
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthwatch_sdk::{Combinator, Sensor, Service, System};

    async fn shop_report() -> Report {
        let web = System::all("web", vec![Sensor::up("homepage")]).unwrap();
        let cache = System::new(
            "cache",
            Combinator::Any,
            vec![Sensor::down("redis-1"), Sensor::down("redis-2")],
        )
        .unwrap();
        let tree = Service::new("shop", Combinator::All, vec![web, cache]).unwrap();
        tree.report().await.unwrap()
    }

    #[tokio::test]
    async fn draws_the_whole_tree_indented() {
        let report = shop_report().await;
        let rendered = Console::default().visualise(&report).unwrap();

        assert_eq!(
            rendered,
            "❌ shop\n\
             \x20 ✅ web\n\
             \x20   ✅ homepage\n\
             \x20 ❌ cache\n\
             \x20   ❌ redis-1\n\
             \x20   ❌ redis-2"
        );
    }

    #[tokio::test]
    async fn failing_mode_hides_healthy_subtrees() {
        let report = shop_report().await;
        let console = Console::new(Symbols::default(), Show::Failing);
        let rendered = console.visualise(&report).unwrap();

        assert!(rendered.contains("shop"));
        assert!(rendered.contains("cache"));
        assert!(rendered.contains("redis-1"));
        assert!(!rendered.contains("web"));
        assert!(!rendered.contains("homepage"));
    }

    #[tokio::test]
    async fn failing_mode_always_draws_a_healthy_root() {
        let tree = Service::wrapping("shop", Sensor::up("web"));
        let report = tree.report().await.unwrap();

        let console = Console::new(Symbols::default(), Show::Failing);
        assert_eq!(console.visualise(&report).unwrap(), "✅ shop");
    }

    #[tokio::test]
    async fn custom_symbols() {
        let tree = Service::wrapping("shop", Sensor::constant("web", Status::NotFound));
        let report = tree.report().await.unwrap();

        let symbols = Symbols {
            up: "+".to_string(),
            down: "-".to_string(),
            not_found: "?".to_string(),
        };
        let rendered = Console::new(symbols, Show::All).visualise(&report).unwrap();
        assert_eq!(rendered, "? shop\n  ? web");
    }
}
