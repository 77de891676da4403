use chrono::DateTime;
use jobboard_core::{BoardViewModel, FilterOptions, JobRowView, RecentEntry, ThemeView};

pub fn board(view: &BoardViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if view.filters.is_default() {
        lines.push(view.result_label.clone());
    } else {
        lines.push(format!("{} for {}", view.result_label, view.filters.summary()));
    }
    lines.push(String::new());

    if view.is_empty() {
        lines.push("No results found".to_string());
    }
    for job in &view.jobs {
        lines.extend(job_row(job));
    }

    if view.show_favorites {
        lines.push(String::new());
        lines.extend(favorites(view));
    }
    lines
}

fn job_row(job: &JobRowView) -> [String; 2] {
    let star = if job.is_favorite { '★' } else { '☆' };
    let mut headline = format!("{star} #{:<3} {} · {}", job.id, job.position, job.company);
    if job.is_new {
        headline.push_str("  NEW!");
    }
    if job.is_featured {
        headline.push_str("  FEATURED");
    }
    let details = format!(
        "        {} · {} · {}   [{}]",
        job.posted_at,
        job.contract,
        job.location,
        job.tags.join(", ")
    );
    [headline, details]
}

pub fn favorites(view: &BoardViewModel) -> Vec<String> {
    let mut lines = vec![format!("Favorites ({})", view.favorites_count)];
    if view.favorite_jobs.is_empty() {
        lines.push("  No favorites yet".to_string());
    }
    for row in &view.favorite_jobs {
        lines.push(format!("  #{:<3} {}", row.id, row.label));
    }
    lines
}

pub fn recent(entries: &[RecentEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No recent searches".to_string()];
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let when = DateTime::from_timestamp_millis(entry.ts)
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            format!("{}. {}  ({})  {}", index + 1, entry.summary, when, entry.url)
        })
        .collect()
}

pub fn theme(view: &ThemeView) -> Vec<String> {
    let palette = view.palette;
    vec![
        format!(
            "Theme: {} (preference {}), accent {}",
            view.effective.as_str(),
            view.mode_pref,
            view.accent
        ),
        format!(
            "  accent {}  background {}  paper {}  text {}  muted {}  chips {}",
            palette.accent,
            palette.background,
            palette.paper,
            palette.text,
            palette.muted,
            palette.chip_background
        ),
        format!("  toggle: {}", view.toggle_label()),
    ]
}

pub fn share(view: &BoardViewModel) -> Vec<String> {
    if view.share_copied {
        vec![format!("{} {}", view.share_label(), view.share_link)]
    } else {
        vec![format!("Share link: {}", view.share_link)]
    }
}

pub fn options(options: &FilterOptions) -> Vec<String> {
    let row = |label: &str, values: &[String]| format!("{label:<10}{}", values.join(", "));
    vec![
        row("Roles", &options.roles),
        row("Levels", &options.levels),
        row("Contracts", &options.contracts),
        row("Tags", &options.tags),
    ]
}
