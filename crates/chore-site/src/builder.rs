//! Staged site builds with atomic promotion.
//!
//! A build stages everything — copied assets, fixed files, rendered pages —
//! into a scratch directory created *next to* the output directory, so the
//! final promote is a same-filesystem rename. The scratch is owned by a
//! `TempDir`: if the builder is dropped before [`Builder::finish`], staging
//! is discarded and the live output is untouched.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::Serialize;
use tempfile::TempDir;
use tracing::{debug, info};
use walkdir::WalkDir;

use chore_catalog::load_catalog;
use chore_core::model::ChoreGroup;
use chore_rota::{Assignment, RotaCalendar, assign_all};

use crate::errors::BuildError;
use crate::render::Engine;

/// One rendered page: the catalog it reads, the template that renders it,
/// and the site path its `index.html` lands under.
#[derive(Clone, Debug)]
pub struct PageSpec {
    /// Catalog file name, relative to the site root.
    pub config: String,
    /// Template file name, relative to `templates/`.
    pub template: String,
    /// Site path (`/`, `/welly`, ...).
    pub path: String,
}

impl PageSpec {
    /// Page spec from its three parts.
    pub fn new(
        config: impl Into<String>,
        template: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            config: config.into(),
            template: template.into(),
            path: path.into(),
        }
    }
}

/// Context handed to a chores-page template.
#[derive(Serialize)]
struct ChoresContext<'a> {
    chore_groups: &'a IndexMap<String, ChoreGroup>,
    group_assignments: &'a IndexMap<String, Assignment>,
    current_weekend_date: String,
    current_offset: i64,
    chores_json: IndexMap<&'a String, (Vec<&'a String>, &'a Vec<String>)>,
}

/// An in-progress staged build.
pub struct Builder {
    site_root: PathBuf,
    output_dir: PathBuf,
    scratch: TempDir,
    engine: Engine,
    calendar: RotaCalendar,
}

impl Builder {
    /// Enter Staging: allocate the scratch directory and template engine.
    ///
    /// The scratch lives in the output directory's parent so that
    /// [`Builder::finish`] can promote it with a rename instead of a copy.
    pub fn stage(
        site_root: &Path,
        output_dir: &Path,
        calendar: RotaCalendar,
    ) -> Result<Self, BuildError> {
        let parent = match output_dir.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| BuildError::io(&parent, e))?;
        let scratch = TempDir::with_prefix_in(".choreworld-build-", &parent)
            .map_err(|e| BuildError::io(&parent, e))?;
        debug!(scratch = %scratch.path().display(), "staging build");
        Ok(Self {
            site_root: site_root.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            scratch,
            engine: Engine::new(site_root.join("templates")),
            calendar,
        })
    }

    /// The staged output root (useful in tests and diagnostics).
    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    fn dest(&self, path: &str) -> PathBuf {
        self.scratch.path().join(path.trim_start_matches('/'))
    }

    /// Copy a directory tree into the staged output at `dest_path`.
    pub fn copy_dir(&self, src: &Path, dest_path: &str) -> Result<(), BuildError> {
        let dest_root = self.dest(dest_path);
        for entry in WalkDir::new(src) {
            let entry = entry.map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                BuildError::io(src, source)
            })?;
            let Ok(rel) = entry.path().strip_prefix(src) else {
                continue;
            };
            let target = dest_root.join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| BuildError::io(&target, e))?;
            } else {
                if let Some(dir) = target.parent() {
                    fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
                }
                let _ = fs::copy(entry.path(), &target).map_err(|e| BuildError::io(&target, e))?;
            }
        }
        Ok(())
    }

    /// Write a fixed file into the staged output.
    pub fn write_file(&self, dest_path: &str, contents: &str) -> Result<(), BuildError> {
        let target = self.dest(dest_path);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).map_err(|e| BuildError::io(dir, e))?;
        }
        fs::write(&target, contents).map_err(|e| BuildError::io(&target, e))
    }

    /// Render one chores page into the staged output.
    ///
    /// Loads the page's catalog fresh, resolves the week containing
    /// `instant`, assigns every group at that week's offset, and renders
    /// `index.html` under the page's path.
    pub fn render_chores(&self, page: &PageSpec, instant: DateTime<Tz>) -> Result<(), BuildError> {
        let catalog = load_catalog(&self.site_root.join(&page.config))?;
        let week = self.calendar.week_of(instant);
        let assignments = assign_all(week.offset, &catalog)?;
        let chores_json = catalog
            .iter()
            .map(|(id, group)| {
                let chore_ids: Vec<&String> = group.chores.iter().map(|c| &c.id).collect();
                (id, (chore_ids, &group.people))
            })
            .collect();
        let context = ChoresContext {
            chore_groups: &catalog,
            group_assignments: &assignments,
            current_weekend_date: self.calendar.format_date(week.sunday),
            current_offset: week.offset,
            chores_json,
        };
        let html = self.engine.render(&page.template, &context)?;

        let dest_dir = self.dest(&page.path);
        fs::create_dir_all(&dest_dir).map_err(|e| BuildError::io(&dest_dir, e))?;
        let index = dest_dir.join("index.html");
        fs::write(&index, html).map_err(|e| BuildError::io(&index, e))?;
        info!(
            page = %page.path,
            template = %page.template,
            offset = week.offset,
            "page rendered"
        );
        Ok(())
    }

    /// Enter Publishing: promote the staged output to the live directory.
    ///
    /// Removes the previous output, then renames the scratch into its place.
    /// The two steps are not crash-atomic — a failure in between can leave
    /// no live output, which is why the error variant marks the state
    /// undefined.
    pub fn finish(self) -> Result<PathBuf, BuildError> {
        let Self {
            output_dir, scratch, ..
        } = self;
        let publish_err = |source| BuildError::Publish {
            path: output_dir.display().to_string(),
            source,
        };
        if output_dir.exists() {
            fs::remove_dir_all(&output_dir).map_err(publish_err)?;
        }
        let staged = scratch.keep();
        fs::rename(&staged, &output_dir).map_err(publish_err)?;
        info!(output = %output_dir.display(), "site published");
        Ok(output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chore_rota::calendar::DEFAULT_TZ;

    const TEMPLATE: &str = "{{ current_weekend_date }}: \
{% for id, person in group_assignments.main|items %}{{ id }}={{ person }};{% endfor %}\
offset={{ current_offset }}";

    const CONFIG: &str = "main:\n  chores:\n    - bins\n    - kitchen\n  people:\n    - Alice\n    - Tom\n";

    fn site_fixture() -> TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("templates")).unwrap();
        fs::write(root.path().join("templates/page.jinja"), TEMPLATE).unwrap();
        fs::write(root.path().join("chch.yaml"), CONFIG).unwrap();
        fs::create_dir_all(root.path().join("static")).unwrap();
        fs::write(root.path().join("static/style.css"), "body {}\n").unwrap();
        root
    }

    fn monday() -> DateTime<Tz> {
        // Monday 12 April 2021; its Sunday is 18 April, offset 1.
        DEFAULT_TZ.with_ymd_and_hms(2021, 4, 12, 9, 0, 0).single().unwrap()
    }

    #[test]
    fn renders_page_into_scratch() {
        let site = site_fixture();
        let out = tempfile::tempdir().unwrap();
        let builder = Builder::stage(
            site.path(),
            &out.path().join("www"),
            RotaCalendar::default(),
        )
        .unwrap();
        builder
            .render_chores(&PageSpec::new("chch.yaml", "page.jinja", "/"), monday())
            .unwrap();
        let html = fs::read_to_string(builder.scratch_path().join("index.html")).unwrap();
        assert_eq!(html, "Sunday, 18 April 2021: bins=Tom;kitchen=Alice;offset=1");
    }

    #[test]
    fn nested_page_path_gets_own_directory() {
        let site = site_fixture();
        let out = tempfile::tempdir().unwrap();
        let builder = Builder::stage(
            site.path(),
            &out.path().join("www"),
            RotaCalendar::default(),
        )
        .unwrap();
        builder
            .render_chores(&PageSpec::new("chch.yaml", "page.jinja", "/welly"), monday())
            .unwrap();
        assert!(builder.scratch_path().join("welly/index.html").exists());
    }

    #[test]
    fn copies_assets_and_writes_fixed_files() {
        let site = site_fixture();
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("www");
        let builder = Builder::stage(site.path(), &output, RotaCalendar::default()).unwrap();
        builder.copy_dir(&site.path().join("static"), "/static").unwrap();
        builder.write_file("/CNAME", "chore.world\n").unwrap();
        builder.write_file("/.nojekyll", "").unwrap();
        let published = builder.finish().unwrap();

        assert_eq!(published, output);
        assert_eq!(
            fs::read_to_string(output.join("static/style.css")).unwrap(),
            "body {}\n"
        );
        assert_eq!(fs::read_to_string(output.join("CNAME")).unwrap(), "chore.world\n");
        assert_eq!(fs::read_to_string(output.join(".nojekyll")).unwrap(), "");
    }

    #[test]
    fn finish_replaces_previous_output() {
        let site = site_fixture();
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("www");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("stale.html"), "old").unwrap();

        let builder = Builder::stage(site.path(), &output, RotaCalendar::default()).unwrap();
        builder.write_file("/fresh.html", "new").unwrap();
        let _ = builder.finish().unwrap();

        assert!(!output.join("stale.html").exists());
        assert_eq!(fs::read_to_string(output.join("fresh.html")).unwrap(), "new");
    }

    #[test]
    fn drop_discards_scratch_and_keeps_output() {
        let site = site_fixture();
        let out = tempfile::tempdir().unwrap();
        let output = out.path().join("www");
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("live.html"), "live").unwrap();

        let scratch_path;
        {
            let builder = Builder::stage(site.path(), &output, RotaCalendar::default()).unwrap();
            builder.write_file("/half-done.html", "partial").unwrap();
            scratch_path = builder.scratch_path().to_path_buf();
        }

        assert!(!scratch_path.exists());
        assert_eq!(fs::read_to_string(output.join("live.html")).unwrap(), "live");
        assert!(!output.join("half-done.html").exists());
    }

    #[test]
    fn missing_catalog_aborts_staging() {
        let site = site_fixture();
        let out = tempfile::tempdir().unwrap();
        let builder = Builder::stage(
            site.path(),
            &out.path().join("www"),
            RotaCalendar::default(),
        )
        .unwrap();
        let err = builder
            .render_chores(&PageSpec::new("missing.yaml", "page.jinja", "/"), monday())
            .unwrap_err();
        assert!(matches!(err, BuildError::Catalog(_)));
    }

    #[test]
    fn empty_roster_aborts_staging() {
        let site = site_fixture();
        fs::write(
            site.path().join("empty.yaml"),
            "main:\n  chores: [bins]\n  people: []\n",
        )
        .unwrap();
        let out = tempfile::tempdir().unwrap();
        let builder = Builder::stage(
            site.path(),
            &out.path().join("www"),
            RotaCalendar::default(),
        )
        .unwrap();
        let err = builder
            .render_chores(&PageSpec::new("empty.yaml", "page.jinja", "/"), monday())
            .unwrap_err();
        assert!(matches!(err, BuildError::Rota(_)));
    }
}
