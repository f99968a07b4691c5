use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tooling and naming settings. Every field defaults to the standard project setup,
/// so an absent or partial TOML file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldSettings {
    pub toolchain: ToolchainSettings,
    pub git: GitSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    pub prerequisites: Vec<String>,
    pub package_manager: String,
    pub package_runner: String,
    pub compiler: String,
    pub frontend_generator: String,
    pub dependencies: Vec<String>,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            prerequisites: vec!["git".to_string(), "npm".to_string()],
            package_manager: "npm".to_string(),
            package_runner: "npx".to_string(),
            compiler: "tsc".to_string(),
            frontend_generator: "create-react-app".to_string(),
            dependencies: ["express", "react", "react-dom", "redux", "typescript", "pg"]
                .iter()
                .map(|dep| dep.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitSettings {
    pub program: String,
    pub branch: String,
    pub commit_message: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            branch: "develop".to_string(),
            commit_message: "Initial commit".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: "setup.log".to_string(),
        }
    }
}

impl ScaffoldSettings {
    /// Tools that must be on PATH before anything is created: the configured prerequisites
    /// plus every program the run invokes directly, without duplicates.
    pub fn required_tools(&self) -> Vec<&str> {
        let mut tools: Vec<&str> = Vec::new();
        let invoked = [
            self.git.program.as_str(),
            self.toolchain.package_manager.as_str(),
            self.toolchain.package_runner.as_str(),
        ];
        for tool in self
            .toolchain
            .prerequisites
            .iter()
            .map(String::as_str)
            .chain(invoked)
        {
            if !tools.contains(&tool) {
                tools.push(tool);
            }
        }
        tools
    }

    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScaffoldError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NPM_BIN})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScaffoldError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let toolchain = &self.toolchain;
        validation::validate_non_empty_list("toolchain.prerequisites", &toolchain.prerequisites)?;
        validation::validate_non_empty_list("toolchain.dependencies", &toolchain.dependencies)?;
        validation::validate_program("toolchain.package_manager", &toolchain.package_manager)?;
        validation::validate_program("toolchain.package_runner", &toolchain.package_runner)?;
        validation::validate_program("toolchain.compiler", &toolchain.compiler)?;
        validation::validate_program(
            "toolchain.frontend_generator",
            &toolchain.frontend_generator,
        )?;

        validation::validate_program("git.program", &self.git.program)?;
        validation::validate_program("git.branch", &self.git.branch)?;
        validation::validate_non_empty_string("git.commit_message", &self.git.commit_message)?;

        validation::validate_path("logging.file", &self.logging.file)?;

        Ok(())
    }
}

impl Validate for ScaffoldSettings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
