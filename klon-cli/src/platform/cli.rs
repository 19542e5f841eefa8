//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和输入文档上下文打印。

use klon_api::KlonError;

/// 打印错误并显示输入文档上下文
pub fn print_error_with_source(e: &KlonError, source: &str, line: usize, column: usize) {
    eprintln!("❌ {}", e.to_report());
    print_source_context(source, line, column);
}

/// 打印输入文档上下文（显示错误行前后几行）
pub fn print_source_context(source: &str, error_line: usize, error_col: usize) {
    const CONTEXT_LINES: usize = 5; // 错误行前后显示的上下文行数

    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return;
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);

    // 行号的最大宽度用于对齐
    let max_line_num_width = end_line.to_string().len();

    let separator = "-".repeat(max_line_num_width + 1);
    eprintln!("{separator}|--");

    for line_idx in start_line..=end_line {
        let line_content = lines[line_idx - 1];
        eprintln!("{line_idx:>max_line_num_width$} | {line_content}");

        if line_idx == error_line {
            let marker_padding = " ".repeat(max_line_num_width + 3 + error_col.saturating_sub(1));
            eprintln!("{marker_padding}^");
        }
    }

    eprintln!("{separator}|--");
}
