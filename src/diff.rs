//! @ai:module:intent Word-level diff highlighting for transcription review
//! @ai:module:layer domain
//! @ai:module:public_api DiffHighlighter, DiffToken, Opcode
//! @ai:module:stateless true

/// @ai:intent One aligned span between expected and actual token streams
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opcode {
    Equal { tokens: Vec<String> },
    Insert { tokens: Vec<String> },
    Delete { tokens: Vec<String> },
    Replace { expected: Vec<String>, actual: Vec<String> },
}

/// @ai:intent One output token with its match flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffToken {
    pub text: String,
    pub matched: bool,
}

/// @ai:intent Aligns expected and actual text word-by-word for human review
///
/// Tokenization is whitespace splitting. This is language-agnostic but not
/// a linguistic tokenizer: for languages without whitespace word
/// boundaries (zh/ja/th) a whole phrase is usually one token, so the diff
/// degrades to phrase-level. That is a known limitation of this
/// component, not something it tries to fix.
///
/// The alignment is a longest-common-subsequence edit script with fixed
/// tie-breaking, so identical inputs always produce byte-identical
/// output. The result is for human inspection only and never feeds
/// pass/fail scoring.
pub struct DiffHighlighter;

impl DiffHighlighter {
    /// @ai:intent Create a new highlighter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Compute the minimal edit script between token streams
    /// @ai:effects pure
    pub fn opcodes(&self, expected: &str, actual: &str) -> Vec<Opcode> {
        let exp: Vec<&str> = expected.split_whitespace().collect();
        let act: Vec<&str> = actual.split_whitespace().collect();

        let table = lcs_table(&exp, &act);
        let steps = backtrack(&table, &exp, &act);
        group_steps(&steps, &exp, &act)
    }

    /// @ai:intent Flatten the edit script into (token, is_match) pairs
    ///
    /// Equal and replaced/inserted spans emit actual-side tokens; deleted
    /// spans emit the missing expected-side tokens so a reviewer sees
    /// what the backend dropped.
    /// @ai:effects pure
    pub fn highlight(&self, expected: &str, actual: &str) -> Vec<DiffToken> {
        let mut out = Vec::new();

        for op in self.opcodes(expected, actual) {
            match op {
                Opcode::Equal { tokens } => {
                    out.extend(tokens.into_iter().map(|text| DiffToken {
                        text,
                        matched: true,
                    }));
                }
                Opcode::Insert { tokens }
                | Opcode::Delete { tokens }
                | Opcode::Replace { actual: tokens, .. } => {
                    out.extend(tokens.into_iter().map(|text| DiffToken {
                        text,
                        matched: false,
                    }));
                }
            }
        }

        out
    }

    /// @ai:intent Render highlighted tokens with bracketed mismatches
    /// @ai:effects pure
    pub fn render(&self, tokens: &[DiffToken]) -> String {
        tokens
            .iter()
            .map(|t| {
                if t.matched {
                    t.text.clone()
                } else {
                    format!("[{}]", t.text)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for DiffHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// One backtracked alignment step, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Match,
    Delete,
    Insert,
}

/// @ai:intent Build the LCS length table over token slices
/// @ai:effects pure
fn lcs_table(exp: &[&str], act: &[&str]) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; act.len() + 1]; exp.len() + 1];

    for i in 1..=exp.len() {
        for j in 1..=act.len() {
            table[i][j] = if exp[i - 1] == act[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    table
}

/// @ai:intent Recover the edit steps from the LCS table
///
/// Tie-breaking is fixed: on equal scores the deletion (expected side)
/// is taken first, which keeps the output deterministic.
/// @ai:effects pure
fn backtrack(table: &[Vec<usize>], exp: &[&str], act: &[&str]) -> Vec<Step> {
    let mut steps = Vec::with_capacity(exp.len() + act.len());
    let (mut i, mut j) = (exp.len(), act.len());

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && exp[i - 1] == act[j - 1] {
            steps.push(Step::Match);
            i -= 1;
            j -= 1;
        } else if j == 0 || (i > 0 && table[i - 1][j] >= table[i][j - 1]) {
            steps.push(Step::Delete);
            i -= 1;
        } else {
            steps.push(Step::Insert);
            j -= 1;
        }
    }

    steps.reverse();
    steps
}

/// @ai:intent Group raw steps into equal/insert/delete/replace opcodes
/// @ai:effects pure
fn group_steps(steps: &[Step], exp: &[&str], act: &[&str]) -> Vec<Opcode> {
    let mut ops = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    let mut k = 0usize;

    while k < steps.len() {
        match steps[k] {
            Step::Match => {
                let mut tokens = Vec::new();
                while k < steps.len() && steps[k] == Step::Match {
                    tokens.push(act[j].to_string());
                    i += 1;
                    j += 1;
                    k += 1;
                }
                ops.push(Opcode::Equal { tokens });
            }
            Step::Delete | Step::Insert => {
                let mut deleted = Vec::new();
                let mut inserted = Vec::new();
                while k < steps.len() && steps[k] != Step::Match {
                    match steps[k] {
                        Step::Delete => {
                            deleted.push(exp[i].to_string());
                            i += 1;
                        }
                        Step::Insert => {
                            inserted.push(act[j].to_string());
                            j += 1;
                        }
                        Step::Match => unreachable!(),
                    }
                    k += 1;
                }
                ops.push(match (deleted.is_empty(), inserted.is_empty()) {
                    (false, false) => Opcode::Replace {
                        expected: deleted,
                        actual: inserted,
                    },
                    (false, true) => Opcode::Delete { tokens: deleted },
                    (true, false) => Opcode::Insert { tokens: inserted },
                    (true, true) => unreachable!(),
                });
            }
        }
    }

    ops
}
