// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod filter;
pub mod history;
pub mod query;

pub use aggregate::summarize;
pub use filter::filter;
pub use history::build_history;
pub use query::QueryEngine;
