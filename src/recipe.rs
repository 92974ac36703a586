//! Luggage Makefile generation.
//!
//! The recipe hands the actual dmg/pkg build off to Luggage: it includes
//! `luggage.make`, names the package, and declares a payload of exactly two
//! targets, the stock preflight-packing step and an install step that unpacks
//! the tarball into the work directory's /Applications. `${TAR}` and
//! `${WORK_D}` are Luggage's own make variables and stay literal.

use std::path::Path;

use anyhow::Result;

use crate::config::{Config, Names};
use crate::files;

/// Output filename; Luggage is driven by running make against it.
pub const MAKEFILE_FILE: &str = "Makefile";

/// Everything that gets substituted into the recipe text.
#[derive(Debug, Clone)]
pub struct MakefileParams<'a> {
    pub luggage_path: &'a Path,
    pub title: &'a str,
    pub reverse_domain: &'a str,
    pub package_version: Option<u32>,
    pub app_name: &'a str,
    pub tarball_name: &'a str,
    pub installed_app: &'a str,
}

impl<'a> MakefileParams<'a> {
    pub fn new(config: &'a Config, names: &'a Names) -> Self {
        Self {
            luggage_path: &config.luggage_path,
            title: &config.package_id,
            reverse_domain: &config.reverse_domain,
            package_version: config.package_version,
            app_name: &names.app_name,
            tarball_name: &names.tarball_name,
            installed_app: &names.installed_app,
        }
    }

    /// Render the recipe text.
    pub fn render(&self) -> String {
        let version_line = match self.package_version {
            Some(version) => format!("PACKAGE_VERSION={}\n", version),
            None => String::new(),
        };
        // The install recipe line runs through make and then the shell, so
        // the app name needs both layers escaped.
        let installed_app = escape_make_shell(self.installed_app);

        format!(
            "#\n\
             # Package {installed_app_comment}\n\
             #\n\
             # Makefile generated by app2luggage\n\
             #\n\
             \n\
             include {luggage_path}\n\
             \n\
             TITLE={title}\n\
             REVERSE_DOMAIN={reverse_domain}\n\
             {version_line}\
             PAYLOAD=\\\n\
             \tpack-script-preflight \\\n\
             \tinstall-app2luggage-{app_name}\n\
             \n\
             \n\
             install-app2luggage-{app_name}: l_Applications {tarball_name}\n\
             \t@sudo ${{TAR}} xjf {tarball_name} -C ${{WORK_D}}/Applications\n\
             \t@sudo chown -R root:admin \"${{WORK_D}}/Applications/{installed_app}\"\n",
            installed_app_comment = self.installed_app,
            luggage_path = self.luggage_path.display(),
            title = self.title,
            reverse_domain = self.reverse_domain,
            version_line = version_line,
            app_name = self.app_name,
            tarball_name = self.tarball_name,
            installed_app = installed_app,
        )
    }
}

/// Write the recipe into the workspace.
///
/// Refuses to overwrite an existing `Makefile`.
pub fn write_makefile(config: &Config, names: &Names, workspace: &Path) -> Result<()> {
    let params = MakefileParams::new(config, names);
    files::write_new(&workspace.join(MAKEFILE_FILE), params.render(), "Makefile")
}

/// Escape a name for a double-quoted string on a make recipe line.
///
/// Make expands `$` first, so it is doubled; the rest is the usual
/// double-quote shell escaping.
fn escape_make_shell(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '$' => escaped.push_str("$$"),
            '\\' | '"' | '`' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}
