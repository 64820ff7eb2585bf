//! PowerDex FTP drop client.

use std::{
    fs::File,
    io,
    path::PathBuf,
};

use suppaftp::FtpStream;

use crate::prelude::*;

pub struct Client {
    ftp: FtpStream,
}

impl Client {
    #[instrument(skip(username, password))]
    pub fn connect(hostname: &str, port: u16, username: &str, password: &str) -> Result<Self> {
        info!("connecting…");
        let mut ftp = FtpStream::connect((hostname, port))
            .with_context(|| format!("failed to connect to `{hostname}:{port}`"))?;
        ftp.login(username, password).context("failed to log in")?;
        info!("logged in");
        Ok(Self { ftp })
    }

    /// List the contents of the root directory.
    #[instrument(skip_all)]
    pub fn list(&mut self) -> Result<Vec<String>> {
        let working_directory =
            self.ftp.pwd().context("failed to get the working directory")?;
        info!(%working_directory, "changing to the root directory…");
        self.ftp.cwd("/").context("failed to change to the root directory")?;
        self.ftp.list(None).context("failed to list the directory")
    }

    /// Download the remote file, defaulting to its base name in the current directory.
    ///
    /// Returns the local path the file was saved to.
    #[instrument(skip(self))]
    pub fn download(&mut self, remote_path: &str, local_path: Option<PathBuf>) -> Result<PathBuf> {
        let (remote_directory, file_name) = split_remote_path(remote_path)?;
        if let Some(remote_directory) = remote_directory {
            self.ftp
                .cwd(remote_directory)
                .with_context(|| format!("failed to change to `{remote_directory}`"))?;
            debug!(remote_directory, "changed the directory");
        }
        let local_path = local_path.unwrap_or_else(|| PathBuf::from(file_name));
        info!(path = %local_path.display(), "downloading…");
        let mut reader = self
            .ftp
            .retr_as_stream(file_name)
            .with_context(|| format!("failed to retrieve `{file_name}`"))?;
        let mut file = File::create(&local_path)
            .with_context(|| format!("failed to create `{}`", local_path.display()))?;
        io::copy(&mut reader, &mut file).context("failed to download the file")?;
        self.ftp.finalize_retr_stream(reader).context("failed to finalize the transfer")?;
        info!(path = %local_path.display(), "downloaded");
        Ok(local_path)
    }

    pub fn quit(mut self) -> Result {
        self.ftp.quit().context("failed to quit")?;
        info!("disconnected");
        Ok(())
    }
}

/// Split a remote path into the containing directory and the base file name.
///
/// A leading slash means the root directory, no directory means the current one.
fn split_remote_path(remote_path: &str) -> Result<(Option<&str>, &str)> {
    let (remote_directory, file_name) = match remote_path.rsplit_once('/') {
        None => (None, remote_path),
        Some(("", file_name)) => (Some("/"), file_name),
        Some((remote_directory, file_name)) => (Some(remote_directory), file_name),
    };
    ensure!(!file_name.is_empty(), "`{remote_path}` does not contain a file name");
    Ok((remote_directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bare_file_name() -> Result {
        assert_eq!(split_remote_path("report.csv")?, (None, "report.csv"));
        Ok(())
    }

    #[test]
    fn test_split_nested_path() -> Result {
        assert_eq!(
            split_remote_path("/outbound/2024/report.csv")?,
            (Some("/outbound/2024"), "report.csv"),
        );
        Ok(())
    }

    #[test]
    fn test_split_relative_path() -> Result {
        assert_eq!(split_remote_path("outbound/report.csv")?, (Some("outbound"), "report.csv"));
        Ok(())
    }

    #[test]
    fn test_split_root_path() -> Result {
        assert_eq!(split_remote_path("/report.csv")?, (Some("/"), "report.csv"));
        Ok(())
    }

    #[test]
    fn test_split_trailing_slash_fails() {
        assert!(split_remote_path("/outbound/").is_err());
    }
}
