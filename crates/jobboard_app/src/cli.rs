use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jobboard_core::{Accent, JobId, ModePref, Msg, SortKey};

#[derive(Parser, Debug)]
#[command(
    name = "jobboard",
    version,
    about = "Job board with shareable, persistent filters"
)]
pub struct Cli {
    /// Configuration file (RON). Defaults to ./jobboard.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the filtered job listing.
    List(ListArgs),
    /// Add a job to the favorites, or remove it when already there.
    Favorite { id: JobId },
    /// Show the favorites panel.
    Favorites {
        #[arg(long)]
        clear: bool,
    },
    /// Show recent searches.
    Recent {
        #[arg(long)]
        clear: bool,
        /// Re-open the N-th recent search (1 = newest).
        #[arg(long, value_name = "N")]
        open: Option<usize>,
    },
    /// Show or change the color theme.
    Theme(ThemeArgs),
    /// Copy the current share link.
    Share {
        #[arg(long)]
        url: Option<String>,
    },
    /// Show the role, level, contract and tag options.
    Options,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Page address to hydrate from, query string included.
    #[arg(long)]
    pub url: Option<String>,
    #[arg(short = 'q', long = "search")]
    pub search: Option<String>,
    #[arg(long = "new")]
    pub only_new: bool,
    #[arg(long = "featured")]
    pub only_featured: bool,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub level: Option<String>,
    #[arg(long)]
    pub contract: Option<String>,
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub sort: Option<SortKey>,
    /// Clear every filter before applying the others.
    #[arg(long)]
    pub reset: bool,
    #[arg(long)]
    pub show_favorites: bool,
}

impl ListArgs {
    /// The flags as UI messages, reset first.
    pub fn messages(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        if self.reset {
            msgs.push(Msg::ResetFilters);
        }
        if let Some(search) = &self.search {
            msgs.push(Msg::SearchChanged(search.clone()));
        }
        if self.only_new {
            msgs.push(Msg::OnlyNewToggled(true));
        }
        if self.only_featured {
            msgs.push(Msg::OnlyFeaturedToggled(true));
        }
        if let Some(role) = &self.role {
            msgs.push(Msg::RoleSelected(role.clone()));
        }
        if let Some(level) = &self.level {
            msgs.push(Msg::LevelSelected(level.clone()));
        }
        if let Some(contract) = &self.contract {
            msgs.push(Msg::ContractSelected(contract.clone()));
        }
        msgs.extend(self.tags.iter().cloned().map(Msg::TagClicked));
        if let Some(sort) = self.sort {
            msgs.push(Msg::SortSelected(sort));
        }
        if self.show_favorites {
            msgs.push(Msg::FavoritesPanelToggled);
        }
        msgs
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ThemeArgs {
    #[arg(long, value_name = "system|light|dark")]
    pub mode: Option<ModePref>,
    /// Flip between light and dark.
    #[arg(long)]
    pub toggle: bool,
    #[arg(long, value_name = "tropical|neutral")]
    pub accent: Option<Accent>,
    /// Treat the system color scheme as dark.
    #[arg(long)]
    pub system_dark: bool,
}

impl ThemeArgs {
    pub fn messages(&self) -> Vec<Msg> {
        let mut msgs = vec![Msg::SystemThemeChanged {
            prefers_dark: self.system_dark,
        }];
        if let Some(mode) = self.mode {
            msgs.push(Msg::ThemeModeSelected(mode));
        }
        if self.toggle {
            msgs.push(Msg::ThemeToggled);
        }
        if let Some(accent) = self.accent {
            msgs.push(Msg::AccentSelected(accent));
        }
        msgs
    }
}
