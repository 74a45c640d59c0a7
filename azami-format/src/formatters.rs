//! 各型のフォーマッタ実装
//!
//! 文字列・パス・ベクトル型のフォーマッタと、標準パターンの登録関数を
//! 提供します。フォーマッタは必要とする能力（メモリ読み取り・二次評価）
//! だけを構築時に注入されます。

use std::rc::Rc;

use crate::classify::{
    classify, Classification, DEFAULT_LEN_THRESHOLD, SENTINEL_EMPTY, SENTINEL_UNINITIALIZED,
};
use crate::decode::decode_quoted;
use crate::errors::{PatternError, RenderError};
use crate::eval::Evaluator;
use crate::memory::MemoryReader;
use crate::registry::{FormatterRegistry, TypeFormatter};
use crate::value::Value;

/// 文字列型のフォーマッタ
///
/// `ptr`/`len` フィールドを持つ文字列構造体を描画します。宣言長の
/// 分類結果に応じてセンチネルを返すか、バッファを読み取ってデコード
/// します。
pub struct StrFormatter {
    memory: Rc<dyn MemoryReader>,
    threshold: u64,
}

impl StrFormatter {
    /// 新しい文字列フォーマッタを作成する
    pub fn new(memory: Rc<dyn MemoryReader>) -> Self {
        Self {
            memory,
            threshold: DEFAULT_LEN_THRESHOLD,
        }
    }

    /// 未初期化判定のしきい値を変更する
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl TypeFormatter for StrFormatter {
    fn format(&self, value: &dyn Value) -> Result<String, RenderError> {
        let ptr = value.field("ptr")?.as_u64()?;
        let len = value.field("len")?.as_u64()?;

        match classify(len, self.threshold) {
            Classification::Empty => Ok(SENTINEL_EMPTY.to_string()),
            Classification::Uninitialized => Ok(SENTINEL_UNINITIALIZED.to_string()),
            Classification::Readable => {
                let bytes = self.memory.read(ptr, len as usize)?;
                Ok(decode_quoted(&bytes)?)
            }
        }
    }
}

/// パス型のフォーマッタ
///
/// 埋め込まれた `buffer` フィールドの文字列変換メソッドを検査対象
/// プロセス内で呼び出し（二次評価）、その結果をそのまま返します。
/// 他のフォーマッタと異なり、バイト列の分類もデコードも行いません。
pub struct PathFormatter {
    evaluator: Rc<dyn Evaluator>,
}

impl PathFormatter {
    /// 新しいパスフォーマッタを作成する
    pub fn new(evaluator: Rc<dyn Evaluator>) -> Self {
        Self { evaluator }
    }
}

impl TypeFormatter for PathFormatter {
    fn format(&self, value: &dyn Value) -> Result<String, RenderError> {
        let buffer = value.field("buffer")?;
        let expr = format!(
            "(({}*){:#x})->as_str()",
            buffer.type_name()?,
            buffer.address()?
        );
        Ok(self.evaluator.evaluate(&expr)?)
    }
}

/// 2成分ベクトル型のフォーマッタ
///
/// `x`/`y` フィールドをホスト既定の表示で読み、宣言順のタプルとして
/// 描画します。メモリスパンの読み取りも分類も行いません。
pub struct Vec2Formatter;

impl TypeFormatter for Vec2Formatter {
    fn format(&self, value: &dyn Value) -> Result<String, RenderError> {
        let x = value.field("x")?.display()?;
        let y = value.field("y")?.display()?;
        Ok(format!("({}, {})", x, y))
    }
}

/// 4成分ベクトル型のフォーマッタ
pub struct Vec4Formatter;

impl TypeFormatter for Vec4Formatter {
    fn format(&self, value: &dyn Value) -> Result<String, RenderError> {
        let x = value.field("x")?.display()?;
        let y = value.field("y")?.display()?;
        let z = value.field("z")?.display()?;
        let w = value.field("w")?.display()?;
        Ok(format!("({}, {}, {}, {})", x, y, z, w))
    }
}

/// 標準の型パターンを登録する
///
/// 文字列型と2/4成分ベクトル型を束縛します。ベクトルのパターンは
/// 型引数に依存しないワイルドカードで、ジェネリックなインスタンス
/// 全体を同じフォーマッタで描画します。
pub fn register_defaults(
    registry: &mut FormatterRegistry,
    memory: Rc<dyn MemoryReader>,
) -> Result<(), PatternError> {
    registry.register("^utf8::str$", Box::new(StrFormatter::new(memory)))?;
    registry.register("^vec2<.*>$", Box::new(Vec2Formatter))?;
    registry.register("^vec4<.*>$", Box::new(Vec4Formatter))?;
    Ok(())
}

/// パス型のパターンを登録する
///
/// 二次評価の能力を必要とするため、標準登録とは分離しています。
/// 評価能力を持たないホスト構成では登録しないままにできます。
pub fn register_path(
    registry: &mut FormatterRegistry,
    evaluator: Rc<dyn Evaluator>,
) -> Result<(), PatternError> {
    registry.register("^fs::path$", Box::new(PathFormatter::new(evaluator)))
}
