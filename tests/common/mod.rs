//! Common test utilities: scripted host capabilities and a sandbox.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ags_provision::provision::{
    CommandOutput, CommandRunner, Host, Invocation, Reporter, Result, SettingsBuilder,
    ToolLocator, Transport, Error,
};
use async_trait::async_trait;
use tempfile::TempDir;

pub const RELEASE_URL: &str = "https://downloads.example.test/AGS-3.6.1.26.zip";
pub const ICON_URL: &str = "https://downloads.example.test/AGSEditor.png";
pub const BREW_INSTALLER_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

type Matcher = Box<dyn Fn(&Invocation) -> bool + Send + Sync>;
type Responder = Box<dyn Fn(&Invocation) -> CommandOutput + Send + Sync>;

/// Command runner that answers from a rule list and records every call.
///
/// Rules are tried newest first; unmatched commands succeed silently.
#[derive(Default)]
pub struct FakeRunner {
    rules: Mutex<Vec<(Matcher, Responder)>>,
    calls: Mutex<Vec<Invocation>>,
    hangs: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Responds to commands whose display form starts with `prefix`.
    pub fn on<F>(&self, prefix: &str, respond: F)
    where
        F: Fn(&Invocation) -> CommandOutput + Send + Sync + 'static,
    {
        let prefix = prefix.to_string();
        self.rules.lock().unwrap().push((
            Box::new(move |inv: &Invocation| inv.to_string().starts_with(&prefix)),
            Box::new(respond),
        ));
    }

    /// Makes commands starting with `prefix` exit with `code`.
    pub fn fail(&self, prefix: &str, code: i32) {
        self.on(prefix, move |_| {
            CommandOutput::exit(code).with_stderr("Error: scripted failure")
        });
    }

    /// Commands starting with `prefix` apply their rule, then never finish.
    pub fn hang(&self, prefix: &str) {
        self.hangs.lock().unwrap().push(prefix.to_string());
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Display forms of every recorded call.
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    pub fn ran(&self, prefix: &str) -> bool {
        self.lines().iter().any(|line| line.starts_with(prefix))
    }

    /// Index of the first call starting with `prefix`.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.lines().iter().position(|line| line.starts_with(prefix))
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(invocation.clone());
        let output = {
            let rules = self.rules.lock().unwrap();
            rules
                .iter()
                .rev()
                .find(|(matches, _)| matches(invocation))
                .map(|(_, respond)| respond(invocation))
                .unwrap_or_else(CommandOutput::ok)
        };
        let line = invocation.to_string();
        let hangs = self
            .hangs
            .lock()
            .unwrap()
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()));
        if hangs {
            std::future::pending::<()>().await;
        }
        Ok(output)
    }
}

/// Serves fixed bytes per URL and remembers where each download went.
#[derive(Default)]
pub struct FakeTransport {
    bodies: Mutex<HashMap<String, Vec<u8>>>,
    stalled: Mutex<HashSet<String>>,
    downloads: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), body.into());
    }

    /// Writes half of the body for `url`, then never completes.
    pub fn stall(&self, url: &str) {
        self.stalled.lock().unwrap().insert(url.to_string());
    }

    pub fn downloads(&self) -> Vec<(String, PathBuf)> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn fetched(&self, url: &str) -> bool {
        self.downloads().iter().any(|(u, _)| u == url)
    }

    /// Destination of the first download of `url`.
    pub fn destination(&self, url: &str) -> Option<PathBuf> {
        self.downloads()
            .into_iter()
            .find(|(u, _)| u == url)
            .map(|(_, dest)| dest)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.downloads
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        let body = self.bodies.lock().unwrap().get(url).cloned();
        let stalled = self.stalled.lock().unwrap().contains(url);
        if stalled {
            let partial = body.as_deref().unwrap_or_default();
            std::fs::write(dest, &partial[..partial.len() / 2])?;
            std::future::pending::<()>().await;
        }
        match body {
            Some(body) => {
                std::fs::write(dest, &body)?;
                Ok(body.len() as u64)
            }
            None => Err(Error::Download {
                url: url.to_string(),
                reason: "HTTP status client error (404 Not Found)".into(),
            }),
        }
    }
}

/// Locator over an in-memory set of executables.
#[derive(Default)]
pub struct FakeLocator {
    executables: Mutex<HashSet<PathBuf>>,
    on_path: Mutex<HashMap<String, PathBuf>>,
    probes: Mutex<Vec<PathBuf>>,
}

impl FakeLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, path: impl Into<PathBuf>) {
        self.executables.lock().unwrap().insert(path.into());
    }

    pub fn put_on_path(&self, name: &str, path: impl Into<PathBuf>) {
        self.on_path
            .lock()
            .unwrap()
            .insert(name.to_string(), path.into());
    }

    pub fn probes(&self) -> Vec<PathBuf> {
        self.probes.lock().unwrap().clone()
    }
}

impl ToolLocator for FakeLocator {
    fn is_executable(&self, path: &Path) -> bool {
        self.probes.lock().unwrap().push(path.to_path_buf());
        self.executables.lock().unwrap().contains(path)
    }

    fn find_in_path(&self, name: &str) -> Option<PathBuf> {
        self.on_path.lock().unwrap().get(name).cloned()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Section(String),
    Progress(String),
    Success(String),
    Warn(String),
}

/// Reporter that keeps every event.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Warn(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn sections(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Section(title) => Some(title),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn section(&self, title: &str) {
        self.events.lock().unwrap().push(Event::Section(title.into()));
    }
    fn progress(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Progress(message.into()));
    }
    fn success(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Success(message.into()));
    }
    fn warn(&self, message: &str) {
        self.events.lock().unwrap().push(Event::Warn(message.into()));
    }
}

/// A temporary machine: install root, scratch dir and scripted tools.
///
/// The default world has Homebrew, Wine and winetricks installed, every
/// build formula present, a release zip with the editor at its root and
/// an icon whose digest matches the pinned one.
pub struct Sandbox {
    pub temp: TempDir,
    pub runner: FakeRunner,
    pub transport: FakeTransport,
    pub locator: Arc<FakeLocator>,
    pub reporter: RecordingReporter,
    pub icon_sha256: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let runner = FakeRunner::new();
        let transport = FakeTransport::new();
        let locator = Arc::new(FakeLocator::new());

        locator.install("/opt/homebrew/bin/brew");
        locator.install("/opt/homebrew/bin/wine");
        locator.install("/opt/homebrew/bin/winetricks");
        locator.install("/opt/homebrew/bin/git");
        locator.install("/opt/homebrew/bin/cmake");

        runner.on("brew list --formula", |_| {
            CommandOutput::ok().with_stdout("cmake\ngit\npkg-config\nsdl2\n")
        });
        runner.on("git clone", |inv| {
            let dest = PathBuf::from(inv.get_args().last().unwrap());
            std::fs::create_dir_all(dest.join("Engine")).unwrap();
            CommandOutput::ok()
        });
        runner.on("cmake --build", |inv| {
            let build_dir = PathBuf::from(&inv.get_args()[1]);
            std::fs::create_dir_all(&build_dir).unwrap();
            std::fs::write(build_dir.join("ags"), b"\xcf\xfa\xed\xfe").unwrap();
            CommandOutput::ok()
        });

        transport.serve(
            RELEASE_URL,
            zip_bytes(&[
                ("AGSEditor.exe", b"MZ editor"),
                ("AGS.Types.dll", b"MZ types"),
            ]),
        );
        let icon = png_bytes();
        let icon_sha256 = sha256_hex(&icon);
        transport.serve(ICON_URL, icon);

        Self {
            temp,
            runner,
            transport,
            locator,
            reporter: RecordingReporter::default(),
            icon_sha256,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn install_root(&self) -> PathBuf {
        self.root().join("Applications")
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.root().join("scratch").join("ags-engine-src")
    }

    /// Builder pointed at the sandbox and the fake URLs.
    pub fn settings(&self) -> SettingsBuilder {
        SettingsBuilder::new()
            .install_root(self.install_root())
            .scratch_dir(self.scratch_dir())
            .release_url(RELEASE_URL)
            .icon(ICON_URL, self.icon_sha256.clone())
            .skip_confirm(true)
    }

    pub fn host(&self) -> Host<'_> {
        Host::new(
            &self.runner,
            &self.transport,
            self.locator.as_ref(),
            &self.reporter,
        )
    }
}

/// Zip archive with the given files.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut cursor);
        for (name, data) in entries {
            zip.start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    cursor.into_inner()
}

/// A small opaque PNG.
pub fn png_bytes() -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(32, 32, image::Rgba([30, 90, 200, 255]));
    let mut cursor = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, image::ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

pub fn sha256_hex(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(data))
}
