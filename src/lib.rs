//! # Party Ledger
//!
//! Shared-expense bookkeeping for groups ("parties"): member rosters, tasks,
//! and itemized expenses with configurable cost-splitting rules.
//!
//! ## Features
//!
//! - **Split resolution**: equal, fixed-amount, percentage and proportional-share splits
//! - **Net balances**: one signed balance per member, rebuilt from scratch on every call
//! - **Debt simplification**: greedy first-debtor/first-creditor settlement plan
//! - **Party management**: roster, task and expense edits over whole-party storage
//! - **Storage abstraction**: trait-based storage with in-memory and JSON-file backends
//!
//! ## Quick Start
//!
//! ```rust
//! use party_ledger::{compute_balances, simplify, Expense, Member, Split};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let members = vec![Member::new("alice", "Alice"), Member::new("bob", "Bob")];
//! let dinner = Expense::new(
//!     "e1".to_string(),
//!     "Dinner".to_string(),
//!     BigDecimal::from(100),
//!     "alice".to_string(),
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     Split::Equal(vec!["alice".to_string(), "bob".to_string()]),
//! );
//!
//! let balances = compute_balances(&members, &[dinner]);
//! let plan = simplify(&balances);
//! assert_eq!(plan[0].from, "bob");
//! assert_eq!(plan[0].amount, BigDecimal::from(50));
//! ```

pub mod config;
pub mod ledger;
pub mod record;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use report::*;
pub use traits::*;
pub use types::*;
