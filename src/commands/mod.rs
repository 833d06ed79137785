// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cards;
pub mod transactions;
pub mod savings;
pub mod exporter;
pub mod doctor;
pub mod settings;
pub mod serve;
