//! Build the static output directory

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tera::Tera;

use crate::error::BuildError;
use crate::Site;

/// Page written when the site has no layout of its own
const MINIMAL_INDEX: &str = r#"<!DOCTYPE html>
<html lang="{{ language }}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{ title }}</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <div class="container">
    <header>
      <h1>{{ title }}</h1>
      {% if description %}<p>{{ description }}</p>{% endif %}
    </header>
    <main>
      {% if routes_json %}<section id="routes">
        <h2>Routes</h2>
        <pre id="routes-data">{{ routes_json }}</pre>
      </section>{% endif %}
    </main>
  </div>
</body>
</html>
"#;

/// Which template produced index.html
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    SiteLayout,
    IndexLayout,
    Minimal,
}

/// Build the site into the output directory
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();
    tracing::info!("Building static site into {:?}", site.dist_dir);

    let artifacts = load_required(site)?;

    create_dir(&site.dist_dir)?;

    copy_styles(site)?;
    copy_data(site)?;
    copy_core(site)?;
    copy_structure(site)?;

    let source = write_index(site, &artifacts)?;
    tracing::info!("index.html generated ({:?})", source);

    tracing::info!("Built in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Parsed JSON of the required data files, keyed by file name
type Artifacts = IndexMap<String, serde_json::Value>;

/// Check every required data file before touching the output; JSON files
/// are parsed so the index layout can embed them
fn load_required(site: &Site) -> Result<Artifacts, BuildError> {
    let mut artifacts = Artifacts::new();
    for name in &site.config.required_files {
        let path = site.data_dir.join(name);
        if !path.is_file() {
            return Err(BuildError::MissingArtifact(path));
        }
        if name.ends_with(".json") {
            artifacts.insert(name.clone(), load_required_json(&path)?);
        }
    }
    Ok(artifacts)
}

/// `routes.json` is substituted for `{{ROUTES}}`
fn placeholder(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    format!("{{{{{}}}}}", stem)
}

fn load_required_json(path: &Path) -> Result<serde_json::Value, BuildError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BuildError::MissingArtifact(path.to_path_buf()))
        }
        Err(e) => return Err(BuildError::Io(path.to_path_buf(), e)),
    };
    serde_json::from_str(&content).map_err(|e| BuildError::InvalidArtifact(path.to_path_buf(), e))
}

fn create_dir(dir: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(dir).map_err(|e| BuildError::Io(dir.to_path_buf(), e))
}

/// Copy `src` to `dst` if it exists; returns whether it was copied
fn copy_if_exists(src: &Path, dst: &Path) -> Result<bool> {
    if !src.is_file() {
        tracing::debug!("Skipping missing {:?}", src);
        return Ok(false);
    }
    fs::copy(src, dst).with_context(|| format!("Failed to copy {:?} to {:?}", src, dst))?;
    Ok(true)
}

fn copy_styles(site: &Site) -> Result<()> {
    for (src, dst) in [("main.css", "styles.css"), ("site.css", "site.css")] {
        if copy_if_exists(&site.styles_dir.join(src), &site.dist_dir.join(dst))? {
            tracing::info!("Stylesheet copied: {}", dst);
        }
    }
    Ok(())
}

fn copy_data(site: &Site) -> Result<()> {
    let out = site.dist_dir.join("data");
    create_dir(&out)?;

    let mut copied = 0;
    for name in &site.config.data_files {
        if copy_if_exists(&site.data_dir.join(name), &out.join(name))? {
            copied += 1;
        }
    }
    tracing::info!("Data copied to {:?} ({} files)", out, copied);
    Ok(())
}

fn copy_core(site: &Site) -> Result<()> {
    if !site.core_dir.is_dir() {
        return Ok(());
    }

    let out = site.dist_dir.join("core");
    create_dir(&out)?;
    for name in &site.config.core_files {
        copy_if_exists(&site.core_dir.join(name), &out.join(name))?;
    }
    tracing::info!("Core scripts copied");
    Ok(())
}

fn copy_structure(site: &Site) -> Result<()> {
    if !site.config_dir.is_dir() {
        return Ok(());
    }

    let out = site.dist_dir.join("config");
    create_dir(&out)?;
    let name = &site.config.structure_file;
    if copy_if_exists(&site.config_dir.join(name), &out.join(name))? {
        tracing::info!("Site structure copied");
    }
    Ok(())
}

/// Write index.html from the first available source: the site layout
/// verbatim, the index layout with data substituted, or the built-in page
fn write_index(site: &Site, artifacts: &Artifacts) -> Result<IndexSource> {
    let out = site.dist_dir.join("index.html");

    let site_layout = site.layouts_dir.join("site.html");
    if copy_if_exists(&site_layout, &out)? {
        return Ok(IndexSource::SiteLayout);
    }

    let index_layout = site.layouts_dir.join("index.html");
    let (html, source) = if index_layout.is_file() {
        let mut html = fs::read_to_string(&index_layout)
            .with_context(|| format!("Failed to read {:?}", index_layout))?;
        for (name, value) in artifacts {
            let json = serde_json::to_string_pretty(value)?;
            html = html.replacen(&placeholder(name), &script_safe(&json), 1);
        }
        (html, IndexSource::IndexLayout)
    } else {
        let routes_json = match artifacts.get("routes.json") {
            Some(routes) => serde_json::to_string_pretty(routes)?,
            None => String::new(),
        };
        (render_minimal(site, &routes_json)?, IndexSource::Minimal)
    };

    fs::write(&out, html).with_context(|| format!("Failed to write {:?}", out))?;
    Ok(source)
}

/// JSON placed inside a `<script>` must not close the element early
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn render_minimal(site: &Site, routes_json: &str) -> Result<String, BuildError> {
    let mut context = tera::Context::new();
    context.insert("title", &site.config.title);
    context.insert("description", &site.config.description);
    context.insert("language", &site.config.language);
    context.insert("routes_json", routes_json);
    Ok(Tera::one_off(MINIMAL_INDEX, &context, true)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site_with_data() -> (TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        write(
            &site.data_dir.join("routes.json"),
            r#"{"routes":[{"path":"/","title":"Home </script>"}]}"#,
        );
        write(&site.data_dir.join("tokens.json"), r#"{"color":"red"}"#);
        (dir, site)
    }

    #[test]
    fn test_missing_required_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        write(&site.data_dir.join("tokens.json"), "{}");

        let err = run(&site).unwrap_err();
        let build_err = err.downcast_ref::<BuildError>().unwrap();
        assert!(matches!(build_err, BuildError::MissingArtifact(p) if p.ends_with("routes.json")));
        assert!(!site.dist_dir.exists());
    }

    #[test]
    fn test_invalid_required_json_aborts() {
        let (_dir, site) = site_with_data();
        write(&site.data_dir.join("tokens.json"), "{not json");
        let err = run(&site).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::InvalidArtifact(..))
        ));
    }

    #[test]
    fn test_build_copies_assets() {
        let (_dir, site) = site_with_data();
        write(&site.data_dir.join("kb_glossary_lite.jsonl"), "{}\n");
        write(&site.styles_dir.join("main.css"), "body{}");
        write(&site.core_dir.join("router.js"), "// router");
        write(&site.config_dir.join("site-structure.json"), "{}");

        run(&site).unwrap();

        let dist = &site.dist_dir;
        assert_eq!(fs::read_to_string(dist.join("styles.css")).unwrap(), "body{}");
        assert!(!dist.join("site.css").exists());
        assert!(dist.join("data/kb_glossary_lite.jsonl").exists());
        assert!(dist.join("data/routes.json").exists());
        assert!(!dist.join("data/stories_digests.jsonl").exists());
        assert!(dist.join("core/router.js").exists());
        assert!(dist.join("config/site-structure.json").exists());
    }

    #[test]
    fn test_minimal_index_escapes_routes() {
        let (_dir, site) = site_with_data();
        run(&site).unwrap();

        let html = fs::read_to_string(site.dist_dir.join("index.html")).unwrap();
        assert!(html.contains("<pre id=\"routes-data\">"));
        assert!(html.contains("&lt;&#x2F;script&gt;") || html.contains("&lt;/script&gt;"));
        assert!(html.contains(&site.config.title.replace('&', "&amp;")));
    }

    #[test]
    fn test_index_layout_substitution() {
        let (_dir, site) = site_with_data();
        write(
            &site.layouts_dir.join("index.html"),
            "<script>const routes = {{ROUTES}}; const tokens = {{TOKENS}};</script>",
        );

        let artifacts = load_required(&site).unwrap();
        create_dir(&site.dist_dir).unwrap();
        assert_eq!(
            write_index(&site, &artifacts).unwrap(),
            IndexSource::IndexLayout
        );

        let html = fs::read_to_string(site.dist_dir.join("index.html")).unwrap();
        assert!(html.contains(r#""color": "red""#));
        assert!(html.contains(r"Home <\/script>"));
        assert!(!html.contains("{{ROUTES}}"));
    }

    #[test]
    fn test_site_layout_wins() {
        let (_dir, site) = site_with_data();
        write(&site.layouts_dir.join("site.html"), "<html>site</html>");
        write(&site.layouts_dir.join("index.html"), "<html>{{ROUTES}}</html>");
        run(&site).unwrap();
        assert_eq!(
            fs::read_to_string(site.dist_dir.join("index.html")).unwrap(),
            "<html>site</html>"
        );
    }

    #[test]
    fn test_placeholder_names() {
        assert_eq!(placeholder("routes.json"), "{{ROUTES}}");
        assert_eq!(placeholder("tokens.json"), "{{TOKENS}}");
    }

    #[test]
    fn test_required_files_follow_config() {
        let (_dir, mut site) = site_with_data();
        site.config.required_files = vec!["tokens.json".to_string()];
        fs::remove_file(site.data_dir.join("routes.json")).unwrap();
        write(
            &site.layouts_dir.join("index.html"),
            "<script>const tokens = {{TOKENS}}; const routes = {{ROUTES}};</script>",
        );

        run(&site).unwrap();
        let html = fs::read_to_string(site.dist_dir.join("index.html")).unwrap();
        assert!(html.contains(r#""color": "red""#));
        assert!(html.contains("{{ROUTES}}"));

        site.config.required_files.push("components.md".to_string());
        let err = run(&site).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingArtifact(p)) if p.ends_with("components.md")
        ));
    }
}
