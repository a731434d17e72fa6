/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! # ma-client
//!
//! Read-only access to the WRDS research database.
//!
//! WRDS is a PostgreSQL endpoint, so the client is a thin layer over a diesel
//! connection pool that loads raw SQL into the bronze row types. Loaders talk
//! to it through the [`WrdsSource`] trait so they can be exercised against
//! in-memory fakes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ma_client::{WrdsClient, WrdsSource, queries};
//! use ma_core::WrdsConfig;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WrdsConfig::from_env()?;
//! let client = WrdsClient::connect(&config)?;
//! let relations = client.industry_relations(queries::INDUSTRY_RELATIONS_QUERY).await?;
//! println!("{} industry relations", relations.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod queries;

pub use client::{WrdsClient, WrdsSource};
pub use error::{Result, WrdsError};
