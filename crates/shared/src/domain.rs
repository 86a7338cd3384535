use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(ProductId);
id_newtype!(CustomerId);
id_newtype!(SaleId);
id_newtype!(MovementId);

/// Stock level classification shown in the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Ok,
    Low,
    Out,
}

impl StockStatus {
    pub fn classify(quantity: i64, min_stock: i64) -> Self {
        if quantity == 0 {
            Self::Out
        } else if quantity <= min_stock {
            Self::Low
        } else {
            Self::Ok
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Low => "Low stock",
            Self::Out => "Out of stock",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Ok => "stock-ok",
            Self::Low => "stock-low",
            Self::Out => "stock-out",
        }
    }
}
