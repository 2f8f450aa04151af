// Copyright (C) 2019-2026 The buildcond Authors.
// This file is part of the buildcond library.

// The buildcond library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The buildcond library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the buildcond library. If not, see <https://www.gnu.org/licenses/>.

/// Declares a resource-keyed diagnostic enum.
///
/// Each `@formatted` entry becomes a struct-like variant carrying the rendered `message`,
/// an optional `help` string, and a stable numeric `code` (offset from `code_mask` by
/// declaration order). An inherent associated function of the same name as the variant is
/// generated as the only public constructor, so callers never build the message text by hand
/// at the call site (`ParserError::ill_formed_equals(pos)`, not `format!(...)`).
#[macro_export]
macro_rules! create_messages {
    (
        $(#[$enum_attr:meta])*
        $name:ident,
        code_mask: $mask:expr,
        code_prefix: $prefix:expr,
        @formatted
        $(
            $(#[$variant_attr:meta])*
            $variant:ident {
                args: ( $( $arg_name:ident : $arg_ty:ty ),* $(,)? ),
                msg: $msg:expr,
                help: $help:expr $(,)?
            }
        )+
    ) => {
        $(#[$enum_attr])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum $name {
            $(
                $(#[$variant_attr])*
                $variant { message: String, help: Option<String>, code: i32 },
            )+
        }

        impl $name {
            $(
                #[allow(clippy::too_many_arguments)]
                pub fn $variant( $( $arg_name : $arg_ty ),* ) -> Self {
                    let message: String = $msg;
                    let help: Option<String> = $help;
                    Self::$variant { message, help, code: $mask + Self::variant_offset(stringify!($variant)) }
                }
            )+

            fn variant_offset(variant: &str) -> i32 {
                const NAMES: &[&str] = &[ $( stringify!($variant) ),+ ];
                NAMES.iter().position(|n| *n == variant).map(|i| i as i32).unwrap_or(0)
            }

            /// The numeric portion of this diagnostic's stable code.
            pub fn code(&self) -> i32 {
                match self {
                    $( Self::$variant { code, .. } => *code, )+
                }
            }

            /// The full `PREFIX0000`-shaped stable code.
            pub fn error_code(&self) -> String {
                format!("{}{:04}", $prefix, self.code())
            }

            pub fn help(&self) -> Option<&str> {
                match self {
                    $( Self::$variant { help, .. } => help.as_deref(), )+
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message, .. } => message.as_str(), )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.error_code(), self.message())?;
                if let Some(help) = self.help() {
                    write!(f, "\n{}", help)?;
                }
                Ok(())
            }
        }

        impl std::error::Error for $name {}
    };
}
