use anyhow::Result;
use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

/// 以两个空格缩进重新排版 XML，并去掉空行
///
/// 元素之间的纯空白文本被丢弃，元素内的文本原样保留；
/// 文本中的换行写为字符引用，因此只包含文本的元素总在同一行。
/// 重复排版的结果不变
pub fn pretty_print(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    // 上一个事件是开始标签，此时遇到的空白文本可能是叶子元素的内容
    let mut open_leaf = false;
    let mut pending_blank: Option<BytesText> = None;
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Text(text) if is_blank(&text) => {
                if open_leaf {
                    pending_blank = Some(text);
                }
                continue;
            }
            Event::Start(start) => {
                writer.write_event(Event::Start(start))?;
                pending_blank = None;
                open_leaf = true;
                continue;
            }
            Event::End(end) => {
                if open_leaf {
                    // 空元素也写一个空文本，使结束标签留在同一行
                    let text = pending_blank.take().unwrap_or_else(|| BytesText::new(""));
                    writer.write_event(Event::Text(escape_line_breaks(text)?))?;
                }
                writer.write_event(Event::End(end))?;
            }
            Event::Text(text) => writer.write_event(Event::Text(escape_line_breaks(text)?))?,
            event => writer.write_event(event)?,
        }
        open_leaf = false;
        pending_blank = None;
    }
    let output = String::from_utf8(writer.into_inner())?;
    Ok(output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn is_blank(text: &BytesText) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

/// 按 XML 的换行规范化规则，`\r\n` 与单独的 `\r` 都视为一个换行
fn escape_line_breaks(text: BytesText<'_>) -> Result<BytesText<'_>> {
    if !text.iter().any(|byte| matches!(byte, b'\n' | b'\r')) {
        return Ok(text);
    }
    let mut escaped = Vec::with_capacity(text.len() + 16);
    let mut bytes = text.iter().peekable();
    while let Some(&byte) = bytes.next() {
        match byte {
            b'\r' => {
                bytes.next_if_eq(&&b'\n');
                escaped.extend_from_slice(b"&#10;");
            }
            b'\n' => escaped.extend_from_slice(b"&#10;"),
            _ => escaped.push(byte),
        }
    }
    Ok(BytesText::from_escaped(String::from_utf8(escaped)?))
}
