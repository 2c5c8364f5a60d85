// Copyright (C) 2009 The Libphonenumber Authors
// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! In-memory dialing rules. Records are assembled with builders, frozen, and
//! collected into a [`MetadataRegistry`] that every other component borrows.

mod errors;
mod number_format;
mod phone_metadata;
mod phone_number_desc;
mod registry;

pub use errors::MetadataError;
pub use number_format::{NumberFormat, NumberFormatBuilder};
pub use phone_metadata::{PhoneMetadata, PhoneMetadataBuilder};
pub use phone_number_desc::{PhoneNumberDesc, PhoneNumberDescBuilder};
pub use registry::MetadataRegistry;
