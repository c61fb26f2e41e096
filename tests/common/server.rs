//! Test server management.
//!
//! Spawns and manages message-board instances for integration testing.

use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::Duration;
use tokio::time::sleep;

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    data_dir: PathBuf,
}

impl TestServer {
    /// Spawn a new test server listening on `port` with a fresh database.
    pub async fn spawn(port: u16) -> anyhow::Result<Self> {
        let data_dir = std::env::temp_dir().join(format!("message-board-test-{}", port));
        let _ = std::fs::remove_dir_all(&data_dir);
        std::fs::create_dir_all(&data_dir)?;

        let config_path = data_dir.join("config.toml");
        let config_content = format!(
            r#"
[server]
listen = "127.0.0.1:{}"
metrics_port = 0

[database]
path = "{}/test.db"
"#,
            port,
            data_dir.display()
        );
        std::fs::write(&config_path, config_content)?;

        let mut command = Command::new(binary_path());
        command.arg(&config_path);

        Self::spawn_with(port, data_dir, &mut command).await
    }

    /// Spawn with no config file at all; listen address and database come
    /// from the environment.
    pub async fn spawn_from_env(port: u16) -> anyhow::Result<Self> {
        let data_dir = std::env::temp_dir().join(format!("message-board-test-{}", port));
        let _ = std::fs::remove_dir_all(&data_dir);
        std::fs::create_dir_all(&data_dir)?;

        let mut command = Command::new(binary_path());
        command
            .arg(data_dir.join("absent.toml"))
            .env("BOARD_LISTEN", format!("127.0.0.1:{}", port))
            .env("BOARD_DATABASE", data_dir.join("env.db"));

        Self::spawn_with(port, data_dir, &mut command).await
    }

    async fn spawn_with(port: u16, data_dir: PathBuf, command: &mut Command) -> anyhow::Result<Self> {
        let child = command.env("RUST_LOG", "warn").spawn()?;

        let server = Self {
            child,
            port,
            data_dir,
        };

        server.wait_until_ready().await?;

        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("Server failed to start within 5 seconds")
    }

    /// Base URL of the board API.
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Create a new HTTP client for this server.
    pub fn client(&self) -> super::client::TestClient {
        super::client::TestClient::new(&self.base_url())
    }

    /// Path of the server's data directory.
    #[allow(dead_code)]
    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }
}

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_message-board"))
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();

        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}
