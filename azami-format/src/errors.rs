//! フォーマット処理のエラー型
//!
//! 操作ごとに明示的なエラー型を定義します。実行時のレンダリングエラーは
//! すべて `RenderError` に集約され、`marker_on_error` でフォールバック
//! マーカーへ変換されます。`PatternError` のみ登録時に呼び出し元へ
//! 伝播します。

use thiserror::Error;

/// レンダリング失敗時のフォールバックマーカー
pub const FALLBACK_MARKER: &str = "{unavailable}";

/// メモリ読み取りエラー
///
/// アドレス範囲が未マップ、アクセス不能、またはプロセスが停止して
/// いない場合に発生します。
#[derive(Debug, Error)]
#[error("cannot read {len} bytes at {addr:#x}: {reason}")]
pub struct MemoryReadError {
    pub addr: u64,
    pub len: usize,
    pub reason: String,
}

/// テキストデコードエラー
#[derive(Debug, Error)]
#[error("invalid UTF-8 sequence after {valid_up_to} bytes")]
pub struct DecodeError {
    pub valid_up_to: usize,
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self {
            valid_up_to: e.valid_up_to(),
        }
    }
}

/// 二次評価エラー
///
/// 検査対象プロセス内での式評価が実行できなかった場合に発生します
/// （シンボル未解決、プロセス非停止、不正な式など）。
#[derive(Debug, Error)]
#[error("evaluation of '{expr}' failed: {reason}")]
pub struct EvaluationError {
    pub expr: String,
    pub reason: String,
}

/// フィールドアクセスエラー
#[derive(Debug, Error)]
#[error("cannot access field '{field}': {reason}")]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// 型名パターンの登録エラー
///
/// レジストリ設定の不備を示すため、起動時にそのまま伝播させます。
#[derive(Debug, Error)]
#[error("malformed type pattern '{pattern}': {reason}")]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

/// レンダリング中に発生しうる実行時エラー
///
/// ホストへ伝播させてはならないエラーの集合です。フォーマッタ境界で
/// `marker_on_error` により必ず吸収されます。
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    MemoryRead(#[from] MemoryReadError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// 実行時エラーをフォールバックマーカーへ変換する唯一のアダプタ
///
/// 対話的なインスペクション中の1回の描画失敗でホストのセッションを
/// 壊さないため、ここですべての `RenderError` を吸収します。
pub fn marker_on_error(result: Result<String, RenderError>) -> String {
    match result {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::debug!("render degraded to fallback marker: {}", e);
            FALLBACK_MARKER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_on_error_passes_through_ok() {
        let result = marker_on_error(Ok("\"hello\"".to_string()));
        assert_eq!(result, "\"hello\"");
    }

    #[test]
    fn test_marker_on_error_absorbs_all_kinds() {
        let read_err = RenderError::from(MemoryReadError {
            addr: 0xdead,
            len: 8,
            reason: "unmapped".to_string(),
        });
        assert_eq!(marker_on_error(Err(read_err)), FALLBACK_MARKER);

        let eval_err = RenderError::from(EvaluationError {
            expr: "x".to_string(),
            reason: "symbol not found".to_string(),
        });
        assert_eq!(marker_on_error(Err(eval_err)), FALLBACK_MARKER);

        let field_err = RenderError::from(FieldError {
            field: "ptr".to_string(),
            reason: "no such field".to_string(),
        });
        assert_eq!(marker_on_error(Err(field_err)), FALLBACK_MARKER);
    }
}
