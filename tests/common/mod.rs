use quill::{InputStream, QuillError, Scope, Template};

pub fn render(template_src: &str, scope: &mut Scope) -> Result<String, QuillError> {
    let template = Template::parse(InputStream::new("test", template_src))?;
    let mut out = Vec::new();
    template.render(scope, &mut out)?;
    Ok(String::from_utf8(out).expect("rendered output should be valid utf-8 in these tests"))
}

pub fn render_ok(template_src: &str, scope: &mut Scope) -> String {
    render(template_src, scope).unwrap_or_else(|e| panic!("expected render to succeed: {e}"))
}
