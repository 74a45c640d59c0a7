//! 二次評価の抽象化
//!
//! 停止中の検査対象プロセス内で式を評価する能力を抽象化します。
//! 生メモリ読み取り（`MemoryReader`）とは独立した能力として扱い、
//! 必要とするフォーマッタにのみ注入します。これにより2つのデータ
//! 取得経路をそれぞれモックで差し替えてテストできます。

use crate::errors::EvaluationError;

/// 停止中のプロセスに対して式を評価する能力
pub trait Evaluator {
    /// 式を評価してテキスト結果を返す
    ///
    /// 評価が実行できない場合（シンボル未解決、プロセス非停止、
    /// 不正な式）は `EvaluationError` を返します。
    fn evaluate(&self, expr: &str) -> Result<String, EvaluationError>;
}
