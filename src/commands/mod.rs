// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod config;
pub mod platforms;
pub mod channels;
pub mod revenues;
pub mod expenses;
pub mod contents;
pub mod freelancers;
pub mod reports;
pub mod importer;
pub mod exporter;
pub mod sync;
pub mod doctor;
