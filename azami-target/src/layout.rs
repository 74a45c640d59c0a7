//! 検査対象の型レイアウトと生メモリ上の値アダプタ
//!
//! DWARF等のデバッグ情報を持たないホスト構成でも値を描画できるよう、
//! 既知の型のフィールドレイアウトを静的な表として持ち、生メモリ上の
//! 値にフォーマットエンジンの `Value` 能力を与えます。

use azami_format::{FieldError, MemoryReader, RenderError, Value};

/// フィールドのスカラ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 64bit符号なし整数（アドレス・長さ用）
    U64,
    /// 32bit浮動小数点数
    F32,
    /// 64bit浮動小数点数
    F64,
    /// 埋め込み構造体（型名でレイアウト表を参照）
    Struct(&'static str),
}

/// フィールドレイアウト
#[derive(Debug, Clone)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: u64,
    pub kind: FieldKind,
}

/// 型レイアウト
#[derive(Debug, Clone)]
pub struct TypeLayout {
    pub name: &'static str,
    pub fields: Vec<FieldLayout>,
}

/// 型レイアウトの表
pub struct LayoutTable {
    layouts: Vec<TypeLayout>,
}

impl LayoutTable {
    /// 組み込みの型レイアウトで表を作成する
    pub fn builtin() -> Self {
        Self {
            layouts: vec![
                TypeLayout {
                    name: "utf8::str",
                    fields: vec![
                        FieldLayout {
                            name: "ptr",
                            offset: 0,
                            kind: FieldKind::U64,
                        },
                        FieldLayout {
                            name: "len",
                            offset: 8,
                            kind: FieldKind::U64,
                        },
                    ],
                },
                TypeLayout {
                    name: "fs::path",
                    fields: vec![FieldLayout {
                        name: "buffer",
                        offset: 0,
                        kind: FieldKind::Struct("utf8::str"),
                    }],
                },
                TypeLayout {
                    name: "vec2<float>",
                    fields: vec![
                        FieldLayout {
                            name: "x",
                            offset: 0,
                            kind: FieldKind::F32,
                        },
                        FieldLayout {
                            name: "y",
                            offset: 4,
                            kind: FieldKind::F32,
                        },
                    ],
                },
                TypeLayout {
                    name: "vec4<float>",
                    fields: vec![
                        FieldLayout {
                            name: "x",
                            offset: 0,
                            kind: FieldKind::F32,
                        },
                        FieldLayout {
                            name: "y",
                            offset: 4,
                            kind: FieldKind::F32,
                        },
                        FieldLayout {
                            name: "z",
                            offset: 8,
                            kind: FieldKind::F32,
                        },
                        FieldLayout {
                            name: "w",
                            offset: 12,
                            kind: FieldKind::F32,
                        },
                    ],
                },
            ],
        }
    }

    /// 型名からレイアウトを検索する
    pub fn find(&self, type_name: &str) -> Option<&TypeLayout> {
        self.layouts.iter().find(|l| l.name == type_name)
    }

    /// 登録済みの型名一覧を取得する
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.layouts.iter().map(|l| l.name)
    }
}

/// 生メモリ上の値
///
/// レイアウト表に基づいてフィールドアクセスを解決し、フォーマット
/// エンジンの `Value` 能力を実装します。デバッグ情報を持つホストが
/// 供給する型付き値の最小限の代替です。
pub struct LiveValue<'a> {
    memory: &'a dyn MemoryReader,
    table: &'a LayoutTable,
    address: u64,
    kind: FieldKind,
}

impl<'a> LiveValue<'a> {
    /// レイアウト表にある型の値を作成する
    ///
    /// 型名が表に存在しない場合は `None` を返します。
    pub fn at(
        memory: &'a dyn MemoryReader,
        table: &'a LayoutTable,
        type_name: &str,
        address: u64,
    ) -> Option<Self> {
        let layout = table.find(type_name)?;
        Some(Self {
            memory,
            table,
            address,
            kind: FieldKind::Struct(layout.name),
        })
    }

    fn field_error(&self, field: &str, reason: String) -> RenderError {
        FieldError {
            field: field.to_string(),
            reason,
        }
        .into()
    }
}

impl Value for LiveValue<'_> {
    fn field<'b>(&'b self, name: &str) -> Result<Box<dyn Value + 'b>, RenderError> {
        let FieldKind::Struct(type_name) = self.kind else {
            return Err(self.field_error(name, "not a struct value".to_string()));
        };
        let layout = self
            .table
            .find(type_name)
            .ok_or_else(|| self.field_error(name, format!("unknown type '{}'", type_name)))?;
        let field = layout
            .fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| self.field_error(name, format!("no such field in '{}'", type_name)))?;

        Ok(Box::new(LiveValue {
            memory: self.memory,
            table: self.table,
            address: self.address + field.offset,
            kind: field.kind,
        }))
    }

    fn as_u64(&self) -> Result<u64, RenderError> {
        match self.kind {
            FieldKind::U64 => Ok(self.memory.read_u64(self.address)?),
            _ => Err(self.field_error("", "not a u64 field".to_string())),
        }
    }

    fn display(&self) -> Result<String, RenderError> {
        match self.kind {
            FieldKind::U64 => Ok(self.memory.read_u64(self.address)?.to_string()),
            FieldKind::F32 => Ok(self.memory.read_f32(self.address)?.to_string()),
            FieldKind::F64 => Ok(self.memory.read_f64(self.address)?.to_string()),
            FieldKind::Struct(name) => {
                Err(self.field_error("", format!("'{}' has no default display", name)))
            }
        }
    }

    fn type_name(&self) -> Result<String, RenderError> {
        let name = match self.kind {
            FieldKind::Struct(name) => name,
            FieldKind::U64 => "u64",
            FieldKind::F32 => "f32",
            FieldKind::F64 => "f64",
        };
        Ok(name.to_string())
    }

    fn address(&self) -> Result<u64, RenderError> {
        Ok(self.address)
    }
}
