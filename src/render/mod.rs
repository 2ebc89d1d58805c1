pub mod golang;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Anything that can write one generated file.
pub trait View {
    fn render(&self, w: &mut dyn Write) -> Result<()>;
}

/// Relative file name → view producing its contents.
pub type Artifacts<'a> = BTreeMap<String, Box<dyn View + 'a>>;

/// A set of artifacts ready to be written below an output directory.
pub struct Fileset<'a> {
    artifacts: Artifacts<'a>,
}

impl<'a> Fileset<'a> {
    pub fn new(artifacts: Artifacts<'a>) -> Self {
        Self { artifacts }
    }

    /// Write every artifact into `dir`, creating it (and parents) first.
    pub fn emit(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {:?}", dir))?;
        for (name, view) in &self.artifacts {
            render_file(&dir.join(name), view.as_ref())
                .with_context(|| format!("rendering file {name:?}"))?;
        }
        Ok(())
    }
}

fn render_file(path: &Path, view: &dyn View) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating file {:?}", path))?;
    let mut out = BufWriter::new(file);
    view.render(&mut out)?;
    out.flush().with_context(|| format!("flushing {:?}", path))?;
    info!("Wrote {}", path.display());
    Ok(())
}

// ── Tests ──
