//! `berth list` — List the applets in the repository.

use std::path::Path;

use berth_common::config::LauncherConfig;
use berth_repo::AppletRepository;
use clap::Args;
use serde::Serialize;

use crate::output;

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the listing as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    key: &'a str,
    name: &'a str,
    image: String,
    dependencies: &'a [String],
}

/// Executes the `list` command.
///
/// # Errors
///
/// Returns an error if the repository cannot be loaded.
pub fn execute(args: ListArgs, config: &LauncherConfig) -> anyhow::Result<()> {
    let repo = super::load_repository(config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&render_json(&repo)?)?);
    } else {
        print!("{}", render_table(&repo, &config.repo_file));
    }
    Ok(())
}

fn render_json(repo: &AppletRepository) -> serde_json::Result<serde_json::Value> {
    let entries: Vec<_> = repo
        .iter()
        .map(|(key, applet)| ListEntry {
            key,
            name: &applet.name,
            image: applet.image_ref(),
            dependencies: &applet.dependencies,
        })
        .collect();
    serde_json::to_value(entries)
}

fn render_table(repo: &AppletRepository, repo_file: &Path) -> String {
    if repo.is_empty() {
        return format!("No applets defined in {}.\n", repo_file.display());
    }
    let mut out = format!("{}\n", output::applet_header());
    for (key, applet) in repo.iter() {
        out.push_str(&output::format_applet_row(key, applet));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = r#"
web:
  name: web
  image: nginx
  dependencies: [cache]
cache:
  image: redis
  image_tag: "7"
"#;

    #[test]
    fn json_lists_applets_in_key_order() {
        let repo = AppletRepository::from_yaml_str(REPO).unwrap();
        assert_eq!(
            render_json(&repo).unwrap(),
            serde_json::json!([
                {"key": "cache", "name": "", "image": "redis:7", "dependencies": []},
                {"key": "web", "name": "web", "image": "nginx:latest", "dependencies": ["cache"]},
            ])
        );
    }

    #[test]
    fn json_of_empty_repository_is_empty_array() {
        let repo = AppletRepository::default();
        assert_eq!(render_json(&repo).unwrap(), serde_json::json!([]));
    }

    #[test]
    fn table_has_header_and_one_row_per_applet() {
        let repo = AppletRepository::from_yaml_str(REPO).unwrap();
        let table = render_table(&repo, Path::new("berth.yml"));
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("APPLET"));
        assert!(lines[1].starts_with("cache") && lines[1].contains("redis:7"));
        assert!(lines[2].starts_with("web") && lines[2].contains("nginx:latest"));
    }

    #[test]
    fn table_of_empty_repository_names_the_file() {
        let table = render_table(&AppletRepository::default(), Path::new("apps.yml"));
        assert_eq!(table, "No applets defined in apps.yml.\n");
    }
}
