use async_trait::async_trait;
use log::debug;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Invalid stylesheet: {0:?}")]
    InvalidStylesheet(String),
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Turns a chart document into another representation using a stylesheet.
#[async_trait]
pub trait Transformer: Send + Sync {
    async fn transform(&self, document: Vec<u8>, stylesheet: &str) -> Result<Vec<u8>, TransformError>;
}

/// Pipes documents through an external `xsltproc`-compatible program.
pub struct XsltProc {
    program: String,
}

impl XsltProc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Transformer for XsltProc {
    async fn transform(&self, document: Vec<u8>, stylesheet: &str) -> Result<Vec<u8>, TransformError> {
        // Would otherwise be read as an option
        if stylesheet.is_empty() || stylesheet.starts_with('-') {
            return Err(TransformError::InvalidStylesheet(stylesheet.to_string()));
        }

        debug!("Running {} {} on {} bytes", self.program, stylesheet, document.len());
        let mut child = Command::new(&self.program)
            .arg(stylesheet)
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| TransformError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(&document).await {
                    debug!("Transform input closed early: {}", e);
                }
            });
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| TransformError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(TransformError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}
