use crate::adapters::LocalWorkspace;
use crate::config::toml_config::ScaffoldSettings;
use crate::core::templates;
use crate::core::{
    CommandRunner, Invocation, Presence, ProjectName, ScaffoldReport, Step, ToolLocator, Workspace,
};
use crate::domain::layout::{self, ProjectLayout};
use crate::utils::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// Runs the scaffolding steps in order, stopping at the first failure.
pub struct Scaffolder<W: Workspace, R: CommandRunner, L: ToolLocator> {
    layout: ProjectLayout,
    settings: ScaffoldSettings,
    workspace: W,
    runner: R,
    locator: L,
}

impl<R: CommandRunner, L: ToolLocator> Scaffolder<LocalWorkspace, R, L> {
    /// Scaffolds on the local filesystem at `layout.root()`.
    pub fn new(layout: ProjectLayout, settings: ScaffoldSettings, runner: R, locator: L) -> Self {
        let workspace = LocalWorkspace::new(layout.root());
        Self {
            layout,
            settings,
            workspace,
            runner,
            locator,
        }
    }
}

impl<W: Workspace, R: CommandRunner, L: ToolLocator> Scaffolder<W, R, L> {
    /// Scaffolds into an arbitrary workspace; the project root is `workspace.root()`.
    pub fn with_workspace(
        name: ProjectName,
        settings: ScaffoldSettings,
        workspace: W,
        runner: R,
        locator: L,
    ) -> Self {
        let layout = ProjectLayout::at_root(workspace.root(), name);
        Self {
            layout,
            settings,
            workspace,
            runner,
            locator,
        }
    }

    pub async fn run(&self) -> Result<ScaffoldReport> {
        let mut report = ScaffoldReport::begin(self.layout.root(), &self.settings.git.branch);
        tracing::info!(
            "Scaffolding project '{}' in {}",
            self.layout.name(),
            self.layout.root().display()
        );

        // 前置檢查必須在建立任何目錄之前完成
        self.check_prerequisites()
            .map_err(|e| e.in_step(Step::Prerequisites))?;

        self.ensure_directories(
            Step::ModuleDirectories,
            &self.layout.module_directories(),
            &mut report,
        )
        .await
        .map_err(|e| e.in_step(Step::ModuleDirectories))?;

        self.ensure_directories(
            Step::AuxiliaryDirectories,
            &self.layout.auxiliary_directories(),
            &mut report,
        )
        .await
        .map_err(|e| e.in_step(Step::AuxiliaryDirectories))?;

        self.init_repository()
            .await
            .map_err(|e| e.in_step(Step::GitInit))?;

        self.touch_placeholders(&mut report)
            .await
            .map_err(|e| e.in_step(Step::PlaceholderFiles))?;

        self.init_manifest()
            .await
            .map_err(|e| e.in_step(Step::ManifestInit))?;

        self.install_dependencies()
            .await
            .map_err(|e| e.in_step(Step::DependencyInstall))?;

        self.configure_compiler(&mut report)
            .await
            .map_err(|e| e.in_step(Step::CompilerConfig))?;

        self.emit_templates(&mut report)
            .await
            .map_err(|e| e.in_step(Step::Templates))?;

        self.scaffold_frontend()
            .await
            .map_err(|e| e.in_step(Step::Frontend))?;

        report.committed = self
            .initial_commit()
            .await
            .map_err(|e| e.in_step(Step::InitialCommit))?;

        self.create_branch()
            .await
            .map_err(|e| e.in_step(Step::BranchCreation))?;

        report.finish();
        Ok(report)
    }

    fn check_prerequisites(&self) -> Result<()> {
        tracing::info!("Step: {}", Step::Prerequisites);
        for tool in self.settings.required_tools() {
            match self.locator.locate(tool) {
                Some(path) => tracing::info!("Found {} at {}", tool, path.display()),
                None => {
                    tracing::error!("{} is not installed or not on PATH", tool);
                    return Err(ScaffoldError::MissingPrerequisite {
                        tool: tool.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    async fn ensure_directories(
        &self,
        step: Step,
        directories: &[PathBuf],
        report: &mut ScaffoldReport,
    ) -> Result<()> {
        tracing::info!("Step: {}", step);
        for dir in directories {
            let presence = self.workspace.ensure_dir(dir).await?;
            log_presence("Directory", dir, presence);
            report.record(dir, presence);
        }
        Ok(())
    }

    async fn init_repository(&self) -> Result<()> {
        tracing::info!("Step: {}", Step::GitInit);
        self.run_checked(self.git(["init"])).await
    }

    async fn touch_placeholders(&self, report: &mut ScaffoldReport) -> Result<()> {
        tracing::info!("Step: {}", Step::PlaceholderFiles);
        for file in self.layout.placeholder_files() {
            let presence = self.workspace.touch(&file).await?;
            log_presence("File", &file, presence);
            report.record(&file, presence);
        }
        Ok(())
    }

    async fn init_manifest(&self) -> Result<()> {
        tracing::info!("Step: {}", Step::ManifestInit);
        let invocation = self
            .command(&self.settings.toolchain.package_manager)
            .args(["init", "-y"]);
        self.run_checked(invocation).await
    }

    async fn install_dependencies(&self) -> Result<()> {
        tracing::info!("Step: {}", Step::DependencyInstall);
        let toolchain = &self.settings.toolchain;
        let invocation = self
            .command(&toolchain.package_manager)
            .arg("install")
            .args(toolchain.dependencies.iter().cloned());
        self.run_checked(invocation).await
    }

    async fn configure_compiler(&self, report: &mut ScaffoldReport) -> Result<()> {
        tracing::info!("Step: {}", Step::CompilerConfig);
        let toolchain = &self.settings.toolchain;
        let invocation = self
            .command(&toolchain.package_runner)
            .args([toolchain.compiler.as_str(), "--init"]);
        self.run_checked(invocation).await?;

        // tsc --init 的輸出一律以固定設定覆蓋
        self.overwrite(Path::new(layout::TSCONFIG), &templates::tsconfig()?, report)
            .await
    }

    async fn emit_templates(&self, report: &mut ScaffoldReport) -> Result<()> {
        tracing::info!("Step: {}", Step::Templates);
        let name = self.layout.name();
        let files = [
            (layout::SERVER_ENTRY, templates::server_entry()),
            (layout::ENV_FILE, templates::env_file()),
            (layout::SAMPLE_ENV_FILE, templates::env_file()),
            (layout::DOCKERFILE, templates::dockerfile()),
            (
                layout::KUBERNETES_CONFIG,
                templates::kubernetes_manifest(name),
            ),
            (layout::README, templates::readme(name)),
        ];

        for (path, contents) in files {
            self.overwrite(Path::new(path), &contents, report).await?;
        }
        Ok(())
    }

    async fn scaffold_frontend(&self) -> Result<()> {
        tracing::info!("Step: {}", Step::Frontend);
        let toolchain = &self.settings.toolchain;
        let frontend_dir = self.layout.frontend_dir();
        let invocation = self
            .command(&toolchain.package_runner)
            .arg(toolchain.frontend_generator.as_str())
            .arg(frontend_dir.to_string_lossy());
        self.run_checked(invocation).await
    }

    /// Stages everything and commits unless the index matches HEAD.
    /// Returns whether a commit was made.
    async fn initial_commit(&self) -> Result<bool> {
        tracing::info!("Step: {}", Step::InitialCommit);
        self.run_checked(self.git(["add", "."])).await?;

        // 新倉庫沒有 HEAD 時 diff-index 也回傳非零，照樣提交
        let unchanged = self
            .runner
            .run(&self.git(["diff-index", "--quiet", "HEAD", "--"]))
            .await?;
        if unchanged.success() {
            tracing::info!("No changes since the last commit, skipping initial commit");
            return Ok(false);
        }

        let message = self.settings.git.commit_message.as_str();
        self.run_checked(self.git(["commit", "-m", message])).await?;
        tracing::info!("Committed: {}", message);
        Ok(true)
    }

    async fn create_branch(&self) -> Result<()> {
        tracing::info!("Step: {}", Step::BranchCreation);
        let branch = self.settings.git.branch.as_str();
        self.run_checked(self.git(["checkout", "-b", branch])).await?;
        tracing::info!("Switched to new branch '{}'", branch);
        Ok(())
    }

    async fn overwrite(
        &self,
        path: &Path,
        contents: &str,
        report: &mut ScaffoldReport,
    ) -> Result<()> {
        self.workspace.write_file(path, contents).await?;
        tracing::info!("Wrote {}", path.display());
        report.overwritten.push(path.to_path_buf());
        Ok(())
    }

    fn command(&self, program: &str) -> Invocation {
        Invocation::new(program, self.layout.root())
    }

    fn git<'a>(&self, args: impl IntoIterator<Item = &'a str>) -> Invocation {
        self.command(&self.settings.git.program).args(args)
    }

    async fn run_checked(&self, invocation: Invocation) -> Result<()> {
        tracing::info!("Running: {}", invocation);
        let status = self.runner.run(&invocation).await?;
        if !status.success() {
            return Err(ScaffoldError::CommandFailed {
                command: invocation.command_line(),
                status,
            });
        }
        Ok(())
    }
}

fn log_presence(kind: &str, path: &Path, presence: Presence) {
    match presence {
        Presence::Created => tracing::info!("{} {} created", kind, path.display()),
        Presence::AlreadyPresent => {
            tracing::info!("{} {} already exists, skipping", kind, path.display())
        }
    }
}
