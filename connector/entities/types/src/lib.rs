// Copyright 2020 - present Alex Dukhno
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::{self, Display, Formatter};

#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash, Ord, PartialOrd)]
pub enum SqlType {
    Boolean,
    Num(Num),
    VarChar { len: Option<u64> },
    Date,
    Timestamp,
}

#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash, Ord, PartialOrd)]
pub enum Num {
    Integer,
    BigInt,
    Double,
}

impl SqlType {
    pub fn boolean() -> SqlType {
        SqlType::Boolean
    }

    pub fn integer() -> SqlType {
        SqlType::Num(Num::Integer)
    }

    pub fn big_int() -> SqlType {
        SqlType::Num(Num::BigInt)
    }

    pub fn double() -> SqlType {
        SqlType::Num(Num::Double)
    }

    pub fn var_char(len: u64) -> SqlType {
        SqlType::VarChar { len: Some(len) }
    }

    pub fn unbounded_var_char() -> SqlType {
        SqlType::VarChar { len: None }
    }

    pub fn date() -> SqlType {
        SqlType::Date
    }

    pub fn timestamp() -> SqlType {
        SqlType::Timestamp
    }
}

impl Display for SqlType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Boolean => write!(f, "boolean"),
            SqlType::Num(Num::Integer) => write!(f, "integer"),
            SqlType::Num(Num::BigInt) => write!(f, "bigint"),
            SqlType::Num(Num::Double) => write!(f, "double"),
            SqlType::VarChar { len: Some(len) } => write!(f, "varchar({})", len),
            SqlType::VarChar { len: None } => write!(f, "varchar"),
            SqlType::Date => write!(f, "date"),
            SqlType::Timestamp => write!(f, "timestamp"),
        }
    }
}
