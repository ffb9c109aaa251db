//! Host-side helper: builds the wasm package into `static/pkg` with
//! wasm-pack and serves `static/` on a local port.

#[cfg(not(target_arch = "wasm32"))]
mod serve {
    use std::path::PathBuf;
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context, Result};
    use clap::Parser;
    use tracing_subscriber::EnvFilter;

    #[derive(Parser, Debug)]
    #[command(name = "webgl-hub-serve", version, about = "Build and serve the WebGL Hub site")]
    pub struct Args {
        /// Port for the local HTTP server.
        #[arg(long, env = "WEBGL_HUB_PORT", default_value_t = 8000)]
        pub port: u16,

        /// Serve whatever is already in the static directory.
        #[arg(long)]
        pub skip_build: bool,

        /// Directory holding index.html; the wasm package lands in `<dir>/pkg`.
        #[arg(long, value_name = "DIR", default_value = "static")]
        pub static_dir: PathBuf,

        /// Build in debug mode (faster, larger).
        #[arg(long)]
        pub dev: bool,
    }

    pub fn initialise_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    fn build_package(args: &Args) -> Result<()> {
        let out_dir = args.static_dir.join("pkg");
        let profile = if args.dev { "--dev" } else { "--release" };
        tracing::info!(out = %out_dir.display(), profile, "building wasm package");
        let status = Command::new("wasm-pack")
            .args(["build", profile, "--target", "web", "--out-dir"])
            .arg(&out_dir)
            .status()
            .context("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/)")?;
        if !status.success() {
            bail!("wasm-pack exited with {status}");
        }
        Ok(())
    }

    pub fn run(args: Args) -> Result<()> {
        if !args.static_dir.join("index.html").exists() {
            bail!("{} has no index.html", args.static_dir.display());
        }
        if args.skip_build {
            tracing::info!("--skip-build given; serving existing artifacts");
        } else {
            build_package(&args)?;
        }

        tracing::info!(port = args.port, "serving at http://127.0.0.1:{}/", args.port);
        let status = Command::new("python3")
            .args(["-m", "http.server"])
            .arg(args.port.to_string())
            .arg("--directory")
            .arg(&args.static_dir)
            .stdout(Stdio::null())
            .status()
            .context("failed to start python3 http.server")?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    serve::initialise_tracing();
    serve::run(serve::Args::parse())
}

// The site itself starts from `webgl_hub::wasm::main`.
#[cfg(target_arch = "wasm32")]
fn main() {}
