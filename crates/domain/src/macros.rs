/// 文字列ベースの識別子型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`String` をラップ、serde では素の文字列として扱う）
/// - `new()`: 任意の文字列から作成
/// - `as_str()`: 文字列参照
/// - `Display` impl
///
/// # secret モード
///
/// `secret: true` を指定すると `Debug` 出力を `[REDACTED]` にマスクし、
/// `Display` impl を生成しない（ログへの平文出力を防止）。
///
/// # 使用例
///
/// ```rust
/// use agenda_domain::event::{EventId, VerificationCode};
///
/// let id = EventId::new("E1");
/// assert_eq!(id.to_string(), "E1");
///
/// let code = VerificationCode::new("C1");
/// assert!(format!("{:?}", code).contains("[REDACTED]"));
/// ```
macro_rules! define_string_id {
    // secret アーム: Debug をマスク、Display を生成しない
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident { secret: true $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($Name)).field(&"[REDACTED]").finish()
            }
        }

        _string_id_common!($Name);
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(String);

        _string_id_common!($Name);
    };
}

macro_rules! _string_id_common {
    ($Name:ident) => {
        impl $Name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}
