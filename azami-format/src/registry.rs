//! 型名パターンとフォーマッタのレジストリ

use regex::Regex;

use crate::errors::{marker_on_error, PatternError, RenderError};
use crate::value::Value;

/// 値を表示文字列へ変換するフォーマッタ
pub trait TypeFormatter {
    /// 値を描画する
    fn format(&self, value: &dyn Value) -> Result<String, RenderError>;
}

/// 型名パターンとフォーマッタの束縛
struct Binding {
    source: String,
    pattern: Regex,
    formatter: Box<dyn TypeFormatter>,
}

/// フォーマッタレジストリ
///
/// 登録順にパターンを照合し、最初に一致したフォーマッタが値を描画
/// します。起動時に一度構築され、以後は読み取り専用として扱います。
/// グローバル状態は持たず、テストごとに独立したレジストリを構築
/// できます。
#[derive(Default)]
pub struct FormatterRegistry {
    bindings: Vec<Binding>,
}

impl FormatterRegistry {
    /// 空のレジストリを作成する
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// 型名パターンとフォーマッタを登録する
    ///
    /// パターンは正規表現で、完全一致のアンカー付きパターンと、型引数に
    /// 依存しないワイルドカードパターンの両方を表現できます。同一の
    /// パターン文字列を再登録した場合は既存の束縛を置き換えます
    /// （照合順序は維持されます）。
    pub fn register(
        &mut self,
        pattern: &str,
        formatter: Box<dyn TypeFormatter>,
    ) -> Result<(), PatternError> {
        let compiled = Regex::new(pattern).map_err(|e| PatternError {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(existing) = self.bindings.iter_mut().find(|b| b.source == pattern) {
            existing.pattern = compiled;
            existing.formatter = formatter;
            return Ok(());
        }

        self.bindings.push(Binding {
            source: pattern.to_string(),
            pattern: compiled,
            formatter,
        });
        Ok(())
    }

    /// 型名に一致するフォーマッタで値を描画する
    ///
    /// 一致する束縛がなければ `None` を返し、ホスト側の既定の表示に
    /// フォールバックさせます。フォーマッタの実行時エラーはここで
    /// フォールバックマーカーへ変換されるため、この呼び出し自体が
    /// 失敗することはありません。
    pub fn render(&self, type_name: &str, value: &dyn Value) -> Option<String> {
        let binding = self
            .bindings
            .iter()
            .find(|b| b.pattern.is_match(type_name))?;
        Some(marker_on_error(binding.formatter.format(value)))
    }

    /// 登録済みの束縛数を取得する
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// レジストリが空かどうか
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FieldError, FALLBACK_MARKER};

    /// 固定文字列を返すだけのフォーマッタ
    struct FixedFormatter(&'static str);

    impl TypeFormatter for FixedFormatter {
        fn format(&self, _value: &dyn Value) -> Result<String, RenderError> {
            Ok(self.0.to_string())
        }
    }

    /// 常に失敗するフォーマッタ
    struct FailingFormatter;

    impl TypeFormatter for FailingFormatter {
        fn format(&self, _value: &dyn Value) -> Result<String, RenderError> {
            Err(FieldError {
                field: "x".to_string(),
                reason: "unreadable".to_string(),
            }
            .into())
        }
    }

    /// フィールドを持たないダミー値
    struct NoValue;

    impl Value for NoValue {
        fn field<'a>(&'a self, name: &str) -> Result<Box<dyn Value + 'a>, RenderError> {
            Err(FieldError {
                field: name.to_string(),
                reason: "no fields".to_string(),
            }
            .into())
        }

        fn as_u64(&self) -> Result<u64, RenderError> {
            Err(FieldError {
                field: String::new(),
                reason: "not a scalar".to_string(),
            }
            .into())
        }

        fn display(&self) -> Result<String, RenderError> {
            Ok("<value>".to_string())
        }

        fn type_name(&self) -> Result<String, RenderError> {
            Ok("<anon>".to_string())
        }

        fn address(&self) -> Result<u64, RenderError> {
            Ok(0)
        }
    }

    #[test]
    fn test_dispatch_routes_generic_instantiations() {
        let mut registry = FormatterRegistry::new();
        registry
            .register("^vec2<.*>$", Box::new(FixedFormatter("two")))
            .unwrap();
        registry
            .register("^vec4<.*>$", Box::new(FixedFormatter("four")))
            .unwrap();

        assert_eq!(
            registry.render("vec2<float>", &NoValue),
            Some("two".to_string())
        );
        assert_eq!(
            registry.render("vec4<int>", &NoValue),
            Some("four".to_string())
        );
    }

    #[test]
    fn test_dispatch_miss_returns_none() {
        let mut registry = FormatterRegistry::new();
        registry
            .register("^vec2<.*>$", Box::new(FixedFormatter("two")))
            .unwrap();

        assert_eq!(registry.render("vec3<float>", &NoValue), None);
        assert_eq!(registry.render("unrelated", &NoValue), None);
    }

    #[test]
    fn test_first_match_wins_in_registration_order() {
        let mut registry = FormatterRegistry::new();
        registry
            .register("^vec.*$", Box::new(FixedFormatter("broad")))
            .unwrap();
        registry
            .register("^vec2<.*>$", Box::new(FixedFormatter("narrow")))
            .unwrap();

        // 先に登録された広いパターンが勝つ
        assert_eq!(
            registry.render("vec2<float>", &NoValue),
            Some("broad".to_string())
        );
    }

    #[test]
    fn test_reregistration_replaces_binding_in_place() {
        let mut registry = FormatterRegistry::new();
        registry
            .register("^vec2<.*>$", Box::new(FixedFormatter("old")))
            .unwrap();
        registry
            .register("^vec4<.*>$", Box::new(FixedFormatter("four")))
            .unwrap();
        registry
            .register("^vec2<.*>$", Box::new(FixedFormatter("new")))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.render("vec2<float>", &NoValue),
            Some("new".to_string())
        );
    }

    #[test]
    fn test_malformed_pattern_is_rejected() {
        let mut registry = FormatterRegistry::new();
        let err = registry
            .register("vec2<(", Box::new(FixedFormatter("broken")))
            .unwrap_err();
        assert_eq!(err.pattern, "vec2<(");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_formatter_error_becomes_marker_not_panic() {
        let mut registry = FormatterRegistry::new();
        registry
            .register("^broken$", Box::new(FailingFormatter))
            .unwrap();

        assert_eq!(
            registry.render("broken", &NoValue),
            Some(FALLBACK_MARKER.to_string())
        );
    }
}
