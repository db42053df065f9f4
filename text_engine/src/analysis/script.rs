// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use icu_properties::props::Script;
use icu_properties::CodePointMapData;

use super::line_break::is_mandatory_break;
use crate::model::{CharacterRun, ScriptRun};
use crate::{Character, CharacterIndex, Length};

/// Returns `true` for scripts written right to left.
pub fn is_right_to_left_script(script: Script) -> bool {
    matches!(
        script,
        Script::Arabic
            | Script::Hebrew
            | Script::Syriac
            | Script::Thaana
            | Script::Nko
            | Script::Samaritan
            | Script::Mandaic
            | Script::Adlam
            | Script::HanifiRohingya
            | Script::Kharoshthi
            | Script::Phoenician
            | Script::Avestan
    )
}

/// Returns `true` if `characters[index]` ends a paragraph.
///
/// A carriage return directly followed by a line feed does not; the line feed does.
pub(crate) fn is_new_paragraph(characters: &[Character], index: CharacterIndex) -> bool {
    let ch = characters[index];
    is_mandatory_break(ch) && !(ch == '\r' && characters.get(index + 1) == Some(&'\n'))
}

fn is_weak(script: Script) -> bool {
    matches!(script, Script::Common | Script::Inherited | Script::Unknown)
}

fn new_run(character_index: CharacterIndex, number_of_characters: Length) -> ScriptRun {
    ScriptRun {
        character_run: CharacterRun::new(character_index, number_of_characters),
        script: Script::Unknown,
        is_right_to_left: false,
    }
}

fn push_run(runs: &mut Vec<ScriptRun>, mut run: ScriptRun) {
    if run.character_run.is_empty() {
        return;
    }
    if run.script == Script::Unknown {
        run.script = Script::Latin;
    }
    runs.push(run);
}

/// Splits `characters[start..start + count]` into script runs appended to `script_runs`.
///
/// Characters without a script of their own (spaces, punctuation, digits, combining marks) join
/// a neighbouring run: the previous one when it shares the paragraph's leading direction or the
/// direction of the next run, otherwise the next one. A run made only of such characters is
/// tagged Latin. Paragraph separators close the current run.
pub fn set_scripts(
    characters: &[Character],
    start: CharacterIndex,
    count: Length,
    script_runs: &mut Vec<ScriptRun>,
) {
    let scripts = CodePointMapData::<Script>::new();
    let end = start + count;

    let mut current = new_run(start, 0);
    let mut pending_weak = 0;
    let mut paragraph_rtl: Option<bool> = None;

    for index in start..end {
        let script = scripts.get(characters[index]);

        if is_new_paragraph(characters, index) {
            current.character_run.number_of_characters += pending_weak + 1;
            pending_weak = 0;
            push_run(script_runs, current);
            current = new_run(index + 1, 0);
            paragraph_rtl = None;
            continue;
        }

        if is_weak(script) {
            if current.script == Script::Unknown {
                current.character_run.number_of_characters += 1;
            } else {
                pending_weak += 1;
            }
            continue;
        }

        if current.script == Script::Unknown {
            current.script = script;
            current.is_right_to_left = is_right_to_left_script(script);
            current.character_run.number_of_characters += 1;
            paragraph_rtl.get_or_insert(current.is_right_to_left);
            continue;
        }

        if script == current.script {
            current.character_run.number_of_characters += pending_weak + 1;
            pending_weak = 0;
            continue;
        }

        let is_right_to_left = is_right_to_left_script(script);
        let keep_with_current = current.is_right_to_left == is_right_to_left
            || Some(current.is_right_to_left) == paragraph_rtl;
        let carried = if keep_with_current {
            current.character_run.number_of_characters += pending_weak;
            0
        } else {
            pending_weak
        };
        pending_weak = 0;
        push_run(script_runs, current);
        current = ScriptRun {
            character_run: CharacterRun::new(index - carried, carried + 1),
            script,
            is_right_to_left,
        };
    }

    current.character_run.number_of_characters += pending_weak;
    push_run(script_runs, current);
}
