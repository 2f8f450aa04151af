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

/// The host-provided context an evaluation runs against.
///
/// Property/item/metadata resolution is the host's job; this trait narrows the property,
/// item, and metadata providers, the expansion interface, and the loaded-projects cache down
/// to the one thing every one of them reduces to from the evaluator's point of view: turning
/// an unexpanded `String` node's text into its expanded form. `file_or_directory_exists` and
/// `record_conditioned_property` are the two remaining collaborator calls the evaluator makes
/// directly.
pub trait EvaluationState {
    /// Expands `text` (a property/item/metadata reference, or plain text containing one)
    /// into its final string value.
    fn expand(&mut self, text: &str) -> String;

    /// Non-throwing file-or-directory probe backing `Exists`. Any platform-level failure
    /// (invalid path, permission denied) should already have been absorbed by the host and
    /// reported here as `false`.
    fn file_or_directory_exists(&self, path: &str) -> bool;

    /// The directory relative paths passed to `Exists` are resolved against. `None` means
    /// relative paths are probed as-is (the working directory is the host's concern).
    fn evaluation_directory(&self) -> Option<&str> {
        None
    }

    /// Records that `name` was compared (via `==`/`!=`) against the literal `value`. Only
    /// called when the comparison's left side actually expanded to something different from
    /// its unexpanded text, i.e. it referenced a property. A no-op by default: the
    /// conditioned-properties feature is active only when a host opts in by overriding this.
    fn record_conditioned_property(&mut self, _name: &str, _value: &str) {}
}
