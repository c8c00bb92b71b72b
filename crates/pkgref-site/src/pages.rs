//! Static page assembly and emission.
//!
//! Every page write is an all-or-nothing file replace: open for write, emit,
//! close. Failing to open a destination is fatal and aborts the run. The
//! per-letter index artifacts are written for all 26 letters even when their
//! bucket is empty, so downstream link generation never has to special-case
//! missing letters.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use pkgref_config::TemplateSet;
use pkgref_index::{letters, Catalog, GroupBucket};
use pkgref_manual::{AssetError, ManualError};
use pkgref_meta::PackageDescription;

use crate::escape::escape_html;
use crate::generator::FeatureFlags;
use crate::record::Record;
use crate::template::PageTemplates;

/// Marker shown on the overview page for not-implemented functions.
const NOT_IMPLEMENTED: &str = "not implemented";

/// Error type for site generation.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Catalog construction failed on malformed input.
    #[error("{0}")]
    Index(#[from] pkgref_index::IndexError),
    /// Manual conversion failed.
    #[error("{0}")]
    Manual(#[from] ManualError),
    /// A converted page could not be scanned for assets.
    #[error("{0}")]
    Asset(#[from] AssetError),
    /// An output directory could not be created.
    #[error("Failed to create {}: {source}", .path.display())]
    Create {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// An output file could not be opened or written.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A source file (news, license, website files) could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Source that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Writes the static pages of one package.
pub struct PageWriter {
    package_dir: PathBuf,
    templates: PageTemplates,
    package_name: String,
    package_version: String,
    package_date: String,
}

impl PageWriter {
    /// Create a writer emitting into `package_dir`.
    #[must_use]
    pub fn new(
        package_dir: PathBuf,
        templates: &TemplateSet,
        description: &PackageDescription,
    ) -> Self {
        Self {
            package_dir,
            templates: PageTemplates::from_config(templates),
            package_name: description.name.clone(),
            package_version: description.version.clone(),
            package_date: description.date.clone().unwrap_or_default(),
        }
    }

    /// Assemble header + body + footer and replace the destination file.
    fn write_page(
        &self,
        relative: &str,
        page_title: &str,
        pkgroot: &str,
        body: &str,
    ) -> Result<(), SiteError> {
        let title_text = self.templates.title.render(&[
            ("title", page_title),
            ("name", &self.package_name),
        ]);
        let vars = [
            ("title", title_text.as_str()),
            ("name", self.package_name.as_str()),
            ("pkgroot", pkgroot),
            ("vers", self.package_version.as_str()),
            ("date", self.package_date.as_str()),
        ];
        let mut page = self.templates.header.render(&vars);
        page.push_str(body);
        page.push_str(&self.templates.footer.render(&vars));
        self.write_raw(Path::new(relative), &page)
    }

    /// Replace a file under the package directory with the given content.
    fn write_raw(&self, relative: &Path, content: &str) -> Result<(), SiteError> {
        let path = self.package_dir.join(relative);
        let mut file = std::fs::File::create(&path).map_err(|source| SiteError::Write {
            path: path.clone(),
            source,
        })?;
        file.write_all(content.as_bytes())
            .map_err(|source| SiteError::Write { path, source })
    }

    /// Write the category overview page.
    pub fn write_overview(&self, catalog: &Catalog) -> Result<(), SiteError> {
        let body = overview_body(catalog, &self.package_name);
        self.write_page("overview.html", "Function overview", "../", &body)
    }

    /// Write the per-letter, per-kind index artifacts.
    ///
    /// All 26 letters of all three kinds are written on every run; empty
    /// buckets yield empty files. Each namespace/class referenced from a
    /// list gets its own subdirectory.
    pub fn write_letter_indices(&self, catalog: &Catalog) -> Result<(), SiteError> {
        for kind_dir in ["namespaces", "classes"] {
            let dir = self.package_dir.join(kind_dir);
            std::fs::create_dir_all(&dir).map_err(|source| SiteError::Create {
                path: dir,
                source,
            })?;
        }

        for letter in letters() {
            let bucket = catalog.index().plain(letter);
            let mut names = String::new();
            let mut descriptions = String::new();
            for (name, offset) in bucket {
                names.push_str(name);
                names.push('\n');
                descriptions.push_str(catalog.summary_at(*offset).unwrap_or_default());
                descriptions.push('\n');
            }
            self.write_raw(Path::new(&format!("function_names_{letter}")), &names)?;
            self.write_raw(
                Path::new(&format!("function_descriptions_{letter}")),
                &descriptions,
            )?;

            self.write_group_lists(catalog, "namespaces", letter, catalog.index().namespaced(letter), false)?;
            self.write_group_lists(catalog, "classes", letter, catalog.index().class_methods(letter), true)?;
        }
        Ok(())
    }

    /// Write the name/description list pair of one grouped bucket and make
    /// sure each group has its output subdirectory.
    fn write_group_lists(
        &self,
        catalog: &Catalog,
        kind_dir: &str,
        letter: char,
        bucket: &GroupBucket,
        class_syntax: bool,
    ) -> Result<(), SiteError> {
        let mut names = String::new();
        let mut descriptions = String::new();
        for (group, members) in bucket {
            let group_dir = self.package_dir.join(kind_dir).join(group);
            std::fs::create_dir_all(&group_dir).map_err(|source| SiteError::Create {
                path: group_dir,
                source,
            })?;
            for (leaf, offset) in members {
                if class_syntax {
                    let _ = writeln!(names, "@{group}/{leaf}");
                } else {
                    let _ = writeln!(names, "{group}.{leaf}");
                }
                descriptions.push_str(catalog.summary_at(*offset).unwrap_or_default());
                descriptions.push('\n');
            }
        }
        self.write_raw(
            Path::new(&format!("{kind_dir}/function_names_{letter}")),
            &names,
        )?;
        self.write_raw(
            Path::new(&format!("{kind_dir}/function_descriptions_{letter}")),
            &descriptions,
        )
    }

    /// Write the package landing page.
    pub fn write_index_page(
        &self,
        description: &PackageDescription,
        flags: &FeatureFlags,
        manual_entry: Option<&str>,
    ) -> Result<(), SiteError> {
        let body = index_body(description, flags, manual_entry);
        self.write_page("index.html", &description.name, "../", &body)
    }

    /// Write `NEWS.html` from the package news file. An unreadable source
    /// is fatal.
    pub fn write_news(&self, source: &Path) -> Result<(), SiteError> {
        let text = read_source(source)?;
        let mut body = String::with_capacity(text.len() + 64);
        let _ = write!(
            body,
            "<h1>News for {}</h1>\n<pre>{}</pre>\n",
            escape_html(&self.package_name),
            escape_html(&text)
        );
        self.write_page("NEWS.html", "News", "../", &body)
    }

    /// Write `COPYING.html` from the package license file. An unreadable
    /// source is fatal.
    pub fn write_license(&self, source: &Path) -> Result<(), SiteError> {
        let text = read_source(source)?;
        let mut body = String::with_capacity(text.len() + 64);
        let _ = write!(
            body,
            "<h1>License for {}</h1>\n<pre>{}</pre>\n",
            escape_html(&self.package_name),
            escape_html(&text)
        );
        self.write_page("COPYING.html", "License", "../", &body)
    }

    /// Write `description.json` from the package metadata and the run's
    /// feature flags.
    pub fn write_description(
        &self,
        description: &PackageDescription,
        flags: &FeatureFlags,
    ) -> Result<(), SiteError> {
        let mut record = Record::new();
        record.insert_str("name", &description.name);
        record.insert_str("version", &description.version);
        if let Some(date) = &description.date {
            record.insert_str("date", date);
        }
        record.insert_str("author", &description.author);
        record.insert_str("maintainer", &description.maintainer);
        record.insert_str("license", &description.license);
        if let Some(url) = &description.url {
            record.insert_str("url", url);
        }

        let mut depends = Record::new();
        for dependency in &description.depends {
            depends.insert_str(&dependency.package, dependency.constraint());
        }
        record.insert_record("depends", depends);

        record.insert_bool("has_overview", flags.overview);
        record.insert_bool("has_alphabetical_data", flags.alphabetical_data);
        record.insert_bool("has_short_description", flags.short_description);
        record.insert_bool("has_news", flags.news);
        record.insert_bool("has_package_doc", flags.package_doc);
        record.insert_bool("has_index", flags.index);
        record.insert_bool("has_license", flags.license);
        record.insert_bool("has_website_files", flags.website_files);
        record.insert_bool("has_demos", flags.demos);

        // The serializer emits no trailing newline; the file gets one.
        let mut content = record.serialize();
        content.push('\n');
        self.write_raw(Path::new("description.json"), &content)
    }
}

/// Build the overview page body.
fn overview_body(catalog: &Catalog, package_name: &str) -> String {
    let mut body = String::with_capacity(4096);
    let _ = write!(
        body,
        "<h1>Overview of {}</h1>\n",
        escape_html(package_name)
    );

    body.push_str("<ul class=\"category-list\">\n");
    for category in catalog.categories() {
        let _ = write!(
            body,
            "<li><a href=\"#{}\">{}</a></li>\n",
            category.anchor,
            escape_html(&category.name)
        );
    }
    body.push_str("</ul>\n");

    for category in catalog.categories() {
        let _ = write!(
            body,
            "<h2 id=\"{}\">{}</h2>\n<dl>\n",
            category.anchor,
            escape_html(&category.name)
        );
        for entry in &category.entries {
            let _ = write!(
                body,
                "<dt><a href=\"{}\">{}</a></dt>\n",
                entry_href(&entry.name),
                escape_html(&entry.name)
            );
            match &entry.summary {
                Some(summary) if entry.implemented => {
                    let _ = write!(body, "<dd>{}</dd>\n", escape_html(summary));
                }
                _ => {
                    let _ = write!(body, "<dd><i>{NOT_IMPLEMENTED}</i></dd>\n");
                }
            }
        }
        body.push_str("</dl>\n");
    }
    body
}

/// Location of a function's reference page, relative to the package
/// directory. Each namespace/class has its own subdirectory.
fn entry_href(name: &str) -> String {
    if let Some(rest) = name.strip_prefix('@') {
        if let Some((class, method)) = rest.split_once('/') {
            return format!("classes/{class}/{method}.html");
        }
    }
    if let Some((ns, function)) = name.split_once('.') {
        return format!("namespaces/{ns}/{function}.html");
    }
    format!("function/{name}.html")
}

/// Build the landing page body: the package summary table plus the links the
/// run actually produced.
fn index_body(
    description: &PackageDescription,
    flags: &FeatureFlags,
    manual_entry: Option<&str>,
) -> String {
    let mut body = String::with_capacity(2048);
    let _ = write!(body, "<h1>{}</h1>\n", escape_html(&description.name));

    body.push_str("<table class=\"package-summary\">\n");
    let mut row = |label: &str, value: &str| {
        let _ = write!(
            body,
            "<tr><th>{}</th><td>{}</td></tr>\n",
            label,
            escape_html(value)
        );
    };
    row("Version", &description.version);
    if let Some(date) = &description.date {
        row("Date", date);
    }
    row("Author", &description.author);
    row("Maintainer", &description.maintainer);
    row("License", &description.license);
    if !description.depends.is_empty() {
        let deps = description
            .depends
            .iter()
            .map(|d| {
                let constraint = d.constraint();
                if constraint.is_empty() {
                    d.package.clone()
                } else {
                    format!("{} ({constraint})", d.package)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        row("Dependencies", &deps);
    }
    drop(row);
    if let Some(url) = &description.url {
        let _ = write!(
            body,
            "<tr><th>Website</th><td><a href=\"{0}\">{0}</a></td></tr>\n",
            escape_html(url)
        );
    }
    body.push_str("</table>\n");

    body.push_str("<ul class=\"package-links\">\n");
    if flags.overview {
        body.push_str("<li><a href=\"overview.html\">Function reference</a></li>\n");
    }
    if let Some(entry) = manual_entry {
        let _ = write!(
            body,
            "<li><a href=\"manual/{}\">Package manual</a></li>\n",
            escape_html(entry)
        );
    }
    if flags.news {
        body.push_str("<li><a href=\"NEWS.html\">News</a></li>\n");
    }
    if flags.license {
        body.push_str("<li><a href=\"COPYING.html\">License</a></li>\n");
    }
    body.push_str("</ul>\n");
    body
}

fn read_source(path: &Path) -> Result<String, SiteError> {
    std::fs::read_to_string(path).map_err(|source| SiteError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy a directory tree verbatim. Returns the number of files copied.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<usize, SiteError> {
    let mut files = Vec::new();
    collect_files(source, source, &mut files).map_err(|e| SiteError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    for (relative, absolute) in &files {
        let target = destination.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SiteError::Create {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::copy(absolute, &target).map_err(|source| SiteError::Write {
            path: target,
            source,
        })?;
    }
    Ok(files.len())
}

fn collect_files(
    base: &Path,
    current: &Path,
    files: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<(), std::io::Error> {
    for entry in std::fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(base, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(base) {
            files.push((relative.to_path_buf(), path));
        }
    }
    Ok(())
}
