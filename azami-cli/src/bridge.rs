//! 外部ビルドツールへのブリッジ

use anyhow::Result;
use std::process::Command;

/// 外部ビルドツールへのコマンドブリッジ
///
/// 引数文字列をそのままシェル経由でビルドツールに転送します。引数の
/// 解釈はすべてツール側に委ねます。失敗はコンソールへの1行の診断と
/// して報告され、セッションへは伝播しません。
pub struct CommandBridge {
    label: String,
    tool: String,
}

impl CommandBridge {
    /// 新しいブリッジを作成する
    pub fn new(label: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tool: tool.into(),
        }
    }

    /// 引数文字列をビルドツールへ転送する
    ///
    /// ツールの入出力はホストのチャネルを継承します。どのような失敗も
    /// ここで吸収し、診断行を出力するだけに留めます。
    pub fn execute(&self, args: &str) {
        if let Err(e) = self.run(args) {
            eprintln!("{} error: {}", self.label, e);
        }
    }

    /// ビルドツールを起動して終了を待つ
    fn run(&self, args: &str) -> Result<()> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(format!("{} {}", self.tool, args))
            .status()
            .map_err(|e| anyhow::anyhow!("failed to launch '{}': {}", self.tool, e))?;

        if !status.success() {
            return Err(anyhow::anyhow!("'{}' exited with {}", self.tool, status));
        }
        Ok(())
    }
}
