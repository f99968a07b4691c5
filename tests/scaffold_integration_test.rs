use async_trait::async_trait;
use monolith_scaffold::core::{CommandRunner, CommandStatus, Invocation, Step, ToolLocator};
use monolith_scaffold::utils::error::ErrorCategory;
use monolith_scaffold::{
    LocalWorkspace, ProjectLayout, ProjectName, ScaffoldError, ScaffoldSettings, Scaffolder,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Records every invocation; commands matching `failing` return its exit code.
#[derive(Clone, Default)]
struct RecordingRunner {
    calls: Arc<Mutex<Vec<Invocation>>>,
    failing: Option<(String, i32)>,
}

impl RecordingRunner {
    fn failing_on(prefix: &str, code: i32) -> Self {
        Self {
            failing: Some((prefix.to_string(), code)),
            ..Self::default()
        }
    }

    fn command_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> monolith_scaffold::Result<CommandStatus> {
        self.calls.lock().unwrap().push(invocation.clone());
        let line = invocation.command_line();

        if let Some((prefix, code)) = &self.failing {
            if line.starts_with(prefix.as_str()) {
                return Ok(CommandStatus::from_code(*code));
            }
        }
        // 新倉庫：沒有 HEAD
        if line.starts_with("git diff-index") {
            return Ok(CommandStatus::from_code(128));
        }
        Ok(CommandStatus::SUCCESS)
    }
}

#[derive(Default)]
struct FakeLocator {
    missing: Vec<String>,
}

impl FakeLocator {
    fn without(tool: &str) -> Self {
        Self {
            missing: vec![tool.to_string()],
        }
    }
}

impl ToolLocator for FakeLocator {
    fn locate(&self, tool: &str) -> Option<PathBuf> {
        if self.missing.iter().any(|m| m == tool) {
            None
        } else {
            Some(Path::new("/usr/bin").join(tool))
        }
    }
}

fn scaffolder(
    base: &Path,
    name: ProjectName,
    runner: RecordingRunner,
    locator: FakeLocator,
) -> Scaffolder<LocalWorkspace, RecordingRunner, FakeLocator> {
    let layout = ProjectLayout::new(base, name);
    Scaffolder::new(layout, ScaffoldSettings::default(), runner, locator)
}

#[tokio::test]
async fn test_full_run_creates_project_tree() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();
    let scaffolder = scaffolder(
        temp_dir.path(),
        ProjectName::new("acme"),
        runner.clone(),
        FakeLocator::default(),
    );

    let report = scaffolder.run().await.unwrap();
    let root = temp_dir.path().join("acme");
    assert_eq!(report.project_root, root);

    let modules = ["authentication", "backend", "database", "deployment", "frontend"];
    for module in modules {
        assert!(
            root.join("src/modules").join(module).is_dir(),
            "module {} missing",
            module
        );
    }

    let directories = [
        "src/shared/utils",
        "src/shared/types",
        "tests/unit",
        "tests/integration",
        "scripts",
        "assets",
    ];
    for dir in directories {
        assert!(root.join(dir).is_dir(), "directory {} missing", dir);
    }

    let placeholders = [
        "src/index.ts",
        "package.json",
        ".gitignore",
        "src/modules/database/schema.sql",
        "src/modules/database/seed.sql",
    ];
    for file in placeholders {
        let metadata = std::fs::metadata(root.join(file)).unwrap();
        assert_eq!(metadata.len(), 0, "{} should be empty", file);
    }

    assert!(report.committed);
    assert_eq!(report.branch, "develop");
    assert_eq!(report.created.len(), 5 + 6 + 8);
    assert!(report.already_present.is_empty());
    assert_eq!(report.overwritten.len(), 7);
}

#[tokio::test]
async fn test_commands_run_in_order_at_project_root() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();
    let scaffolder = scaffolder(
        temp_dir.path(),
        ProjectName::new("acme"),
        runner.clone(),
        FakeLocator::default(),
    );

    scaffolder.run().await.unwrap();

    assert_eq!(
        runner.command_lines(),
        vec![
            "git init",
            "npm init -y",
            "npm install express react react-dom redux typescript pg",
            "npx tsc --init",
            "npx create-react-app src/modules/frontend",
            "git add .",
            "git diff-index --quiet HEAD --",
            "git commit -m Initial commit",
            "git checkout -b develop",
        ]
    );

    let root = temp_dir.path().join("acme");
    let calls = runner.calls.lock().unwrap();
    assert!(calls.iter().all(|call| call.cwd == root));
    let commit = calls
        .iter()
        .find(|call| call.args.first().map(String::as_str) == Some("commit"))
        .unwrap();
    assert_eq!(commit.args, vec!["commit", "-m", "Initial commit"]);
}

#[tokio::test]
async fn test_generated_files() {
    let temp_dir = TempDir::new().unwrap();
    let scaffolder = scaffolder(
        temp_dir.path(),
        ProjectName::new("acme"),
        RecordingRunner::default(),
        FakeLocator::default(),
    );
    scaffolder.run().await.unwrap();
    let root = temp_dir.path().join("acme");

    let tsconfig: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root.join("tsconfig.json")).unwrap())
            .unwrap();
    assert_eq!(
        tsconfig,
        serde_json::json!({
            "compilerOptions": {
                "outDir": "./dist",
                "rootDir": "./src",
                "strict": true,
                "module": "commonjs",
                "esModuleInterop": true
            },
            "include": ["src/**/*.ts"],
            "exclude": ["node_modules"]
        })
    );

    let manifest = std::fs::read_to_string(root.join("kubernetes-config.yaml")).unwrap();
    let lines: Vec<&str> = manifest.lines().map(str::trim).collect();
    assert!(lines.contains(&"name: acme-deployment"));
    assert!(lines.contains(&"app: acme"));
    assert!(lines.contains(&"- name: acme"));
    assert!(lines.contains(&"image: acme"));
    assert!(lines.contains(&"replicas: 2"));

    let env = std::fs::read_to_string(root.join(".env")).unwrap();
    let sample_env = std::fs::read_to_string(root.join("sample.env")).unwrap();
    assert_eq!(env, sample_env);
    assert!(env.starts_with("DB_CONNECTION_STRING="));

    let server = std::fs::read_to_string(root.join("src/modules/backend/server.ts")).unwrap();
    assert!(server.contains("app.listen(port"));

    let dockerfile = std::fs::read_to_string(root.join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("EXPOSE 3000"));

    let readme = std::fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.starts_with("# acme"));
}

#[tokio::test]
async fn test_default_project_name_is_root_directory() {
    let temp_dir = TempDir::new().unwrap();
    let scaffolder = scaffolder(
        temp_dir.path(),
        ProjectName::default(),
        RecordingRunner::default(),
        FakeLocator::default(),
    );

    let report = scaffolder.run().await.unwrap();
    let root = temp_dir.path().join("modular-monolith");
    assert_eq!(report.project_root, root);
    assert!(root.join("src/modules/backend").is_dir());
}

#[tokio::test]
async fn test_missing_prerequisite_aborts_before_any_directory() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();
    let scaffolder = scaffolder(
        temp_dir.path(),
        ProjectName::new("acme"),
        runner.clone(),
        FakeLocator::without("npm"),
    );

    let err = scaffolder.run().await.unwrap_err();

    assert_eq!(err.step(), Some(Step::Prerequisites));
    assert_eq!(err.category(), ErrorCategory::Prerequisite);
    assert_eq!(err.exit_code(), 1);
    assert!(matches!(
        err.root_cause(),
        ScaffoldError::MissingPrerequisite { tool } if tool == "npm"
    ));
    assert!(!temp_dir.path().join("acme").exists());
    assert!(runner.command_lines().is_empty());
}

#[tokio::test]
async fn test_configured_package_manager_is_checked_up_front() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::default();
    let settings = ScaffoldSettings::from_toml_str(
        r#"
[toolchain]
package_manager = "pnpm"
"#,
    )
    .unwrap();
    let layout = ProjectLayout::new(temp_dir.path(), ProjectName::new("acme"));
    let locator = FakeLocator::without("pnpm");
    let scaffolder = Scaffolder::new(layout, settings, runner.clone(), locator);

    let err = scaffolder.run().await.unwrap_err();

    assert_eq!(err.step(), Some(Step::Prerequisites));
    assert!(matches!(
        err.root_cause(),
        ScaffoldError::MissingPrerequisite { tool } if tool == "pnpm"
    ));
    assert!(!temp_dir.path().join("acme").exists());
    assert!(runner.command_lines().is_empty());
}

#[tokio::test]
async fn test_custom_workspace_root_is_used_for_commands() {
    let temp_dir = TempDir::new().unwrap();
    let checkout = temp_dir.path().join("checkout");
    let runner = RecordingRunner::default();
    let scaffolder = Scaffolder::with_workspace(
        ProjectName::new("acme"),
        ScaffoldSettings::default(),
        LocalWorkspace::new(&checkout),
        runner.clone(),
        FakeLocator::default(),
    );

    let report = scaffolder.run().await.unwrap();

    assert_eq!(report.project_root, checkout);
    assert!(checkout.join("src/modules/backend").is_dir());
    let manifest = std::fs::read_to_string(checkout.join("kubernetes-config.yaml")).unwrap();
    assert!(manifest.contains("name: acme-deployment"));
    assert!(runner.calls.lock().unwrap().iter().all(|call| call.cwd == checkout));
}

#[tokio::test]
async fn test_failed_install_stops_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::failing_on("npm install", 7);
    let scaffolder = scaffolder(
        temp_dir.path(),
        ProjectName::new("acme"),
        runner.clone(),
        FakeLocator::default(),
    );

    let err = scaffolder.run().await.unwrap_err();

    assert_eq!(err.step(), Some(Step::DependencyInstall));
    assert_eq!(err.exit_code(), 7);
    assert_eq!(
        runner.command_lines().last().unwrap(),
        "npm install express react react-dom redux typescript pg"
    );

    // 已建立的內容不回滾
    let root = temp_dir.path().join("acme");
    assert!(root.join("src/modules/frontend").is_dir());
    assert!(root.join("package.json").exists());
    assert!(!root.join("tsconfig.json").exists());
}

#[tokio::test]
async fn test_failed_frontend_generator_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::failing_on("npx create-react-app", 1);
    let scaffolder = scaffolder(
        temp_dir.path(),
        ProjectName::new("acme"),
        runner.clone(),
        FakeLocator::default(),
    );

    let err = scaffolder.run().await.unwrap_err();

    assert_eq!(err.step(), Some(Step::Frontend));
    let lines = runner.command_lines();
    assert!(!lines.iter().any(|line| line.starts_with("git commit")));
}
