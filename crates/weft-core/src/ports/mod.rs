//! Ports - 差し替え可能な変換レイヤー
//!
//! アプリケーションが独自のシリアライズ形式や暗号化を持ち込むための境界です。
//! 実行レコードのデコードは、この trait 経由でしか payload に触れません。

pub mod codec;
pub mod converter;

pub use self::codec::PayloadCodec;
pub use self::converter::{PayloadConverter, SerializationContext};
