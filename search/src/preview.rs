use common::Job;

/// How many jobs the terminal preview shows.
pub const PREVIEW_LIMIT: usize = 5;

// Display widths of title, company, location, date_posted. job_url is never cut.
const WIDTHS: [usize; 4] = [40, 24, 24, 11];

pub fn columns_line() -> String {
    Job::COLUMNS.join(", ")
}

/// Fixed-width table of the first `limit` jobs.
pub fn render_preview(jobs: &[Job], limit: usize) -> String {
    let mut out = String::new();
    let header: Vec<String> = Job::PREVIEW_COLUMNS.iter().map(|c| c.to_string()).collect();
    push_row(&mut out, &header);

    let rule: Vec<String> = WIDTHS
        .iter()
        .map(|w| "-".repeat(*w))
        .chain(std::iter::once("-".repeat(7)))
        .collect();
    push_row(&mut out, &rule);

    for job in jobs.iter().take(limit) {
        push_row(&mut out, &job.preview_values());
    }

    if jobs.len() > limit {
        out.push_str(&format!("... and {} more\n", jobs.len() - limit));
    }
    out
}

fn push_row(out: &mut String, cells: &[String]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        match WIDTHS.get(i) {
            Some(&width) => {
                let cell = truncate(cell, width);
                line.push_str(&format!("{cell:<width$}  "));
            }
            None => line.push_str(cell),
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
