//! FILENAME: core/script-engine/src/logic.rs
//! PURPOSE: Scripts for truth tables and equivalence checks.
//! CONTEXT: The assignment matrix comes from `dec2bin`, whose first column is
//! the most significant bit, so rows appear in the same order as in-process.
//! Each expression is re-evaluated by `eval_logic_expr`, a local helper that
//! mirrors the tokenizer, precedence table and RPN evaluation of the parser
//! and engine crates over column vectors.

use crate::{quoted, Script, ScriptKind};
use engine::{Equivalence, TruthTable};
use parser::Variable;

/// Helper appended once to every logic script.
pub const LOGIC_HELPER: &str = r#"function R = eval_logic_expr(expr, vars, M)
% Evaluates a propositional formula for every row of the assignment matrix M.
s = expr(~isspace(expr));
tokens = {};
i = 1;
while i <= length(s)
    c = s(i);
    if c == '(' || c == ')'
        tokens{end+1} = c; i = i + 1;
    elseif strncmp(s(i:end), '<->', 3)
        tokens{end+1} = '<->'; i = i + 3;
    elseif strncmp(s(i:end), '->', 2)
        tokens{end+1} = '->'; i = i + 2;
    elseif any(c == '~&|')
        tokens{end+1} = c; i = i + 1;
    elseif strncmp(s(i:end), 'xor(', 4)
        if i + 7 > length(s) || ~any(s(i+4) == 'ABC') || s(i+5) ~= ',' || ~any(s(i+6) == 'ABC') || s(i+7) ~= ')'
            error('malformed xor call at position %d', i);
        end
        tokens{end+1} = s(i:i+7); i = i + 8;
    elseif any(c == 'ABC')
        tokens{end+1} = c; i = i + 1;
    else
        error('invalid symbol at position %d', i);
    end
end

% Shunting-yard: ~ and -> group to the right
prec = containers.Map({'~', '&', '|', '->', '<->'}, {5, 4, 3, 2, 1});
rightAssoc = {'~', '->'};
out = {};
ops = {};
for k = 1:numel(tokens)
    t = tokens{k};
    if isKey(prec, t)
        while ~isempty(ops) && isKey(prec, ops{end})
            p1 = prec(t);
            p2 = prec(ops{end});
            if (ismember(t, rightAssoc) && p1 < p2) || (~ismember(t, rightAssoc) && p1 <= p2)
                out{end+1} = ops{end}; ops(end) = [];
            else
                break;
            end
        end
        ops{end+1} = t;
    elseif strcmp(t, '(')
        ops{end+1} = t;
    elseif strcmp(t, ')')
        while ~isempty(ops) && ~strcmp(ops{end}, '(')
            out{end+1} = ops{end}; ops(end) = [];
        end
        if isempty(ops)
            error('unbalanced parentheses');
        end
        ops(end) = [];
    else
        out{end+1} = t;
    end
end
while ~isempty(ops)
    if strcmp(ops{end}, '(')
        error('unbalanced parentheses');
    end
    out{end+1} = ops{end}; ops(end) = [];
end

% RPN evaluation over column vectors
stack = {};
for k = 1:numel(out)
    t = out{k};
    switch t
        case '~'
            if numel(stack) < 1
                error('missing operand for ~');
            end
            stack{end} = ~stack{end};
        case {'&', '|', '->', '<->'}
            if numel(stack) < 2
                error('missing operands for %s', t);
            end
            b = stack{end}; a = stack{end-1}; stack(end-1:end) = [];
            switch t
                case '&', v = a & b;
                case '|', v = a | b;
                case '->', v = ~a | b;
                otherwise, v = (a == b);
            end
            stack{end+1} = v;
        otherwise
            if length(t) > 1
                v = xor(logic_column(t(5), vars, M), logic_column(t(7), vars, M));
            else
                v = logic_column(t, vars, M);
            end
            stack{end+1} = v;
    end
end
if numel(stack) ~= 1
    error('invalid expression');
end
R = double(stack{1});
end

function v = logic_column(name, vars, M)
idx = find(strcmp(vars, name), 1);
if isempty(idx)
    error('variable %s is not declared', name);
end
v = logical(M(:, idx));
end"#;

fn variable_cell(variables: &[Variable]) -> String {
    let names: Vec<String> = variables.iter().map(|v| quoted(&v.to_string())).collect();
    format!("{{{}}}", names.join(", "))
}

/// Lines that build `vars`, `N` and the assignment matrix `M`.
fn assignment_prelude(variables: &[Variable]) -> Vec<String> {
    vec![
        format!("vars = {};", variable_cell(variables)),
        format!("N = {};", variables.len()),
        "M = dec2bin(0:2^N-1, N) - '0';".to_string(),
    ]
}

fn with_helper(mut lines: Vec<String>) -> Vec<String> {
    lines.push(String::new());
    lines.push("% ===== Local functions =====".to_string());
    lines.push(LOGIC_HELPER.to_string());
    lines
}

pub fn truth_table_script(table: &TruthTable) -> Script {
    let mut lines = vec![
        "% ===== Trivium: truth table =====".to_string(),
        format!("expr = {};", quoted(&table.expression)),
        format!("header = {};", quoted(&table.result_header)),
    ];
    lines.extend(assignment_prelude(&table.variables));
    lines.extend([
        "R = eval_logic_expr(expr, vars, M);".to_string(),
        String::new(),
        "fprintf('%s\\n', strjoin([vars, {header}], ' | '));".to_string(),
        "disp([M R]);".to_string(),
    ]);
    Script::new(ScriptKind::TruthTable, with_helper(lines))
}

pub fn equivalence_script(result: &Equivalence) -> Script {
    let mut lines = vec![
        "% ===== Trivium: logical equivalence =====".to_string(),
        format!("expr1 = {};", quoted(&result.left_expression)),
        format!("expr2 = {};", quoted(&result.right_expression)),
    ];
    lines.extend(assignment_prelude(&result.variables));
    lines.extend(
        [
            "R1 = eval_logic_expr(expr1, vars, M);",
            "R2 = eval_logic_expr(expr2, vars, M);",
            "",
            "idx = find(R1 ~= R2, 1);",
            "if isempty(idx)",
            "    disp('Equivalent: R1 and R2 agree on every row.');",
            "else",
            "    disp('Not equivalent. First counterexample:');",
            "    for j = 1:N",
            "        fprintf('%s=%d ', vars{j}, M(idx, j));",
            "    end",
            "    fprintf('(R1=%d, R2=%d)\\n', R1(idx), R2(idx));",
            "end",
            "disp([M R1 R2]);",
        ]
        .map(String::from),
    );
    Script::new(ScriptKind::Equivalence, with_helper(lines))
}
