use crate::RenderError;
use log::debug;
use rand::{distr::Alphanumeric, Rng};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A finished, immediately-readable document on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
}

/// Supplies the unique identifier baked into each artifact's file name.
/// Concurrent render calls share the filesystem namespace and nothing else,
/// so the whole collision policy is "never produce the same id twice".
/// Injected rather than called ambiently so tests can pin the name.
pub trait ArtifactIds {
    fn next_id(&self) -> String;
}

/// The default id source: 12 random alphanumerics per call
#[derive(Debug, Default, Copy, Clone)]
pub struct RandomIds;

impl ArtifactIds for RandomIds {
    fn next_id(&self) -> String {
        rand::rng()
            .sample_iter(Alphanumeric)
            .take(12)
            .map(char::from)
            .collect()
    }
}

/// Persist `bytes` as `<dir>/<stem>-<id>.pdf`. The write goes to a private
/// `.part` path and is renamed into place only once complete, so a failed
/// write never leaves a partial file visible at the final path.
pub(crate) fn write_artifact(
    dir: &Path,
    stem: &str,
    id: &str,
    bytes: &[u8],
) -> Result<Artifact, RenderError> {
    let path = dir.join(format!("{stem}-{id}.pdf"));
    let part = dir.join(format!("{stem}-{id}.pdf.part"));

    let written = fs::File::create(&part)
        .and_then(|mut file| file.write_all(bytes))
        .and_then(|()| fs::rename(&part, &path));

    match written {
        Ok(()) => {
            debug!("wrote artifact {} ({} bytes)", path.display(), bytes.len());
            Ok(Artifact { path })
        }
        Err(e) => {
            let _ = fs::remove_file(&part);
            Err(e.into())
        }
    }
}
