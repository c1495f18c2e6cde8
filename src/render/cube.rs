//! Rotating 3D cube view of a declaration
//!
//! Each face of the cube shows one aspect of the record: the header on the
//! front, methods on the back, properties on the right, initializers on the
//! left, supertypes on top. The bottom face is reserved for subtypes, which a
//! single declaration unit cannot know about.

use super::escape_html;
use crate::extractor::DeclarationRecord;

const NONE_LABEL: &str = "None";

const STYLE: &str = r#"        body {
            font-family: Arial, sans-serif;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            margin: 0;
            background-color: #f0f8ff;
            perspective: 1000px;
        }
        .scene {
            width: 300px;
            height: 300px;
            perspective: 600px;
        }
        .cube {
            width: 100%;
            height: 100%;
            position: relative;
            transform-style: preserve-3d;
            transition: transform 0.5s;
        }
        .cube__face {
            position: absolute;
            width: 300px;
            height: 300px;
            border: 2px solid #333;
            display: flex;
            justify-content: center;
            align-items: center;
            flex-direction: column;
            padding: 10px;
            box-sizing: border-box;
            font-weight: bold;
            text-align: center;
            opacity: 0.8;
            overflow: auto;
        }
        .cube__face--front  { background: #FF9AA2; transform: rotateY(  0deg) translateZ(150px); }
        .cube__face--right  { background: #FFDAC1; transform: rotateY( 90deg) translateZ(150px); }
        .cube__face--back   { background: #FFB7B2; transform: rotateY(180deg) translateZ(150px); }
        .cube__face--left   { background: #E2F0CB; transform: rotateY(-90deg) translateZ(150px); }
        .cube__face--top    { background: #B5EAD7; transform: rotateX( 90deg) translateZ(150px); }
        .cube__face--bottom { background: #C7CEEA; transform: rotateX(-90deg) translateZ(150px); }
        .type-name {
            font-size: 24px;
            margin-bottom: 10px;
        }
        .content {
            font-size: 14px;
            text-align: left;
        }
        .controls {
            position: absolute;
            bottom: 20px;
            display: flex;
            gap: 10px;
        }
        button {
            padding: 10px 20px;
            background-color: #4682b4;
            color: white;
            border: none;
            border-radius: 5px;
            cursor: pointer;
        }
"#;

const SCRIPT: &str = r#"        const cube = document.querySelector('.cube');
        let rotateX = 0, rotateY = 0;
        let autoRotate = false;

        function updateRotation() {
            cube.style.transform = `rotateX(${rotateX}deg) rotateY(${rotateY}deg)`;
        }

        document.getElementById('rotateX').addEventListener('click', () => {
            rotateX += 90;
            updateRotation();
        });

        document.getElementById('rotateY').addEventListener('click', () => {
            rotateY += 90;
            updateRotation();
        });

        document.getElementById('auto').addEventListener('click', () => {
            autoRotate = !autoRotate;
            if (autoRotate) {
                autoRotateAnimation();
            }
        });

        function autoRotateAnimation() {
            if (autoRotate) {
                rotateY += 1;
                updateRotation();
                requestAnimationFrame(autoRotateAnimation);
            }
        }

        let isDragging = false;
        let previousMousePosition = { x: 0, y: 0 };

        document.addEventListener('mousedown', () => {
            isDragging = true;
        });

        document.addEventListener('mousemove', (e) => {
            if (isDragging) {
                rotateY += (e.clientX - previousMousePosition.x) * 0.5;
                rotateX -= (e.clientY - previousMousePosition.y) * 0.5;
                updateRotation();
            }
            previousMousePosition = { x: e.clientX, y: e.clientY };
        });

        document.addEventListener('mouseup', () => {
            isDragging = false;
        });
"#;

/// Renders a [`DeclarationRecord`] as a rotatable cube page
#[derive(Debug, Clone)]
pub struct CubeRenderer {
    lang: String,
}

impl Default for CubeRenderer {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
        }
    }
}

impl CubeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document `lang` attribute
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn render(&self, record: &DeclarationRecord) -> String {
        let header = format!(
            "{} {}",
            record.kind.label(),
            escape_html(&record.name)
        );

        let mut html = String::with_capacity(8 * 1024);
        html.push_str("<!DOCTYPE html>\n");
        html.push_str(&format!("<html lang=\"{}\">\n", escape_html(&self.lang)));
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("    <title>{} 3D Cube</title>\n", header));
        html.push_str("    <style>\n");
        html.push_str(STYLE);
        html.push_str("    </style>\n");
        html.push_str("</head>\n<body>\n");
        html.push_str("    <div class=\"scene\">\n        <div class=\"cube\">\n");

        push_face(&mut html, "front", &header, "Definition");
        push_face(&mut html, "back", "Methods", &join_entries(&record.methods, ""));
        push_face(
            &mut html,
            "right",
            "Properties",
            &join_entries(&record.properties, ""),
        );
        push_face(
            &mut html,
            "left",
            "Initializers",
            &join_entries(&record.initializers, NONE_LABEL),
        );
        push_face(
            &mut html,
            "top",
            "Supertypes",
            &join_entries(&record.supertypes, NONE_LABEL),
        );
        push_face(&mut html, "bottom", "Subtypes", NONE_LABEL);

        html.push_str("        </div>\n    </div>\n");
        html.push_str("    <div class=\"controls\">\n");
        html.push_str("        <button id=\"rotateX\">Rotate X</button>\n");
        html.push_str("        <button id=\"rotateY\">Rotate Y</button>\n");
        html.push_str("        <button id=\"auto\">Auto Rotate</button>\n");
        html.push_str("    </div>\n\n");
        html.push_str("    <script>\n");
        html.push_str(SCRIPT);
        html.push_str("    </script>\n");
        html.push_str("</body>\n</html>\n");

        html
    }
}

/// `title` and `content` must already be escaped
fn push_face(html: &mut String, side: &str, title: &str, content: &str) {
    html.push_str(&format!(
        "            <div class=\"cube__face cube__face--{}\">\n",
        side
    ));
    html.push_str(&format!(
        "                <div class=\"type-name\">{}</div>\n",
        title
    ));
    html.push_str(&format!(
        "                <div class=\"content\">{}</div>\n",
        content
    ));
    html.push_str("            </div>\n");
}

fn join_entries(entries: &[String], empty: &str) -> String {
    if entries.is_empty() {
        return empty.to_string();
    }
    entries
        .iter()
        .map(|e| escape_html(e))
        .collect::<Vec<_>>()
        .join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::DeclarationKind;

    fn animal() -> DeclarationRecord {
        DeclarationRecord {
            kind: DeclarationKind::ReferenceType,
            name: "Animal".to_string(),
            supertypes: vec!["Base<Int>".to_string(), "Codable".to_string()],
            properties: vec!["var name: String".to_string()],
            methods: vec!["speak() -> String".to_string()],
            initializers: vec![],
        }
    }

    #[test]
    fn test_document_structure() {
        let html = CubeRenderer::new().render(&animal());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<title>Class Animal 3D Cube</title>"));
        assert!(html.trim_end().ends_with("</html>"));
        for side in ["front", "back", "right", "left", "top", "bottom"] {
            assert!(html.contains(&format!("cube__face--{}\"", side)));
        }
    }

    #[test]
    fn test_entries_are_escaped_and_joined() {
        let html = CubeRenderer::new().render(&animal());
        assert!(html.contains("Base&lt;Int&gt;<br>Codable"));
        assert!(html.contains("speak() -&gt; String"));
        assert!(!html.contains("Base<Int>"));
    }

    #[test]
    fn test_empty_initializers_render_none() {
        let html = CubeRenderer::new().render(&animal());
        assert!(html.contains(
            "<div class=\"type-name\">Initializers</div>\n                <div class=\"content\">None</div>"
        ));
    }

    #[test]
    fn test_empty_methods_render_empty() {
        let mut record = animal();
        record.methods.clear();
        let html = CubeRenderer::new().render(&record);
        assert!(html.contains(
            "<div class=\"type-name\">Methods</div>\n                <div class=\"content\"></div>"
        ));
    }

    #[test]
    fn test_custom_lang() {
        let html = CubeRenderer::new().with_lang("zh-TW").render(&animal());
        assert!(html.contains("<html lang=\"zh-TW\">"));
    }
}
